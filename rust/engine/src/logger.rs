use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::events::GameEvent;
use crate::game::{RoundOutcome, WinReason};
use crate::hand::Hand;
use crate::player::Seat;

/// One finished round, serialized as a single JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub round_id: String,
    /// Shuffle seed of the engine, when one was configured
    pub seed: Option<u64>,
    pub round_no: u32,
    /// Every event of the round in emission order
    pub events: Vec<GameEvent>,
    /// Final hands, player first. The opponent's hand is only present when
    /// the round reached showdown.
    pub hands: Vec<Hand>,
    pub outcome: Option<RoundOutcome>,
    /// Balances after settlement, player first
    pub money: [u32; 2],
    /// RFC3339, filled in by the logger when missing
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    /// Captures the engine's current round. Call after the round has been
    /// settled so the outcome and final hands are present.
    pub fn capture(engine: &Engine, round_id: String) -> Self {
        let shown = matches!(
            engine.outcome(),
            Some(RoundOutcome::Won {
                reason: WinReason::Showdown,
                ..
            }) | Some(RoundOutcome::Draw { .. })
        );
        let hands = [Seat::Player, Seat::Opponent]
            .into_iter()
            .filter(|&seat| seat == Seat::Player || shown)
            .filter_map(|seat| engine.player(seat).hand().copied())
            .collect();
        Self {
            round_id,
            seed: engine.config().seed,
            round_no: engine.round_no(),
            events: engine.round_events().to_vec(),
            hands,
            outcome: engine.outcome().cloned(),
            money: [
                engine.player(Seat::Player).money(),
                engine.player(Seat::Opponent).money(),
            ],
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`RoundRecord`]s to a JSONL file.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger with a fixed date and no backing file.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
