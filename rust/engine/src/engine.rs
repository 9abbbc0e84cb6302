use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, error, info};

use crate::config::{ConfigError, EngineConfig, TiePolicy};
use crate::deck::Deck;
use crate::errors::{GameError, IllegalAction};
use crate::events::GameEvent;
use crate::game::{HandRank, Phase, PlayerView, RoundOutcome, RoundState, WinReason};
use crate::hand::{compare_hands, evaluate, Hand, HAND_SIZE};
use crate::player::{Action, PlayerState, Seat};
use crate::policy::{DecisionPolicy, PotContext};
use crate::rules::{self, BettingView, ResolvedAction};

const SEATS: [Seat; 2] = [Seat::Player, Seat::Opponent];

/// Heads-up five-card-draw state machine.
///
/// Every entry point is synchronous. [`Engine::advance`] performs the next
/// transition that needs no input from the player seat (dealing, ante, the
/// opponent's policy turn, showdown, moving to the next round);
/// [`Engine::apply_action`] submits a seat's action. Rejected calls return
/// [`GameError::IllegalAction`] and leave the engine untouched.
///
/// # Examples
///
/// ```
/// use fivedraw_engine::config::EngineConfig;
/// use fivedraw_engine::engine::Engine;
/// use fivedraw_engine::game::Phase;
/// use fivedraw_engine::hand::Hand;
/// use fivedraw_engine::player::{Action, Seat};
/// use fivedraw_engine::policy::{Decision, DecisionPolicy, PolicyAction, PotContext};
///
/// struct Folder;
/// impl DecisionPolicy for Folder {
///     fn decide(&mut self, _: &Hand, _: &PotContext) -> Decision {
///         Decision { action: PolicyAction::Fold, strength: 1.0 }
///     }
///     fn name(&self) -> &str { "Folder" }
/// }
///
/// let config = EngineConfig { seed: Some(7), ..EngineConfig::default() };
/// let mut engine = Engine::new(config, Box::new(Folder)).unwrap();
/// engine.start_round().unwrap();
/// engine.advance().unwrap(); // ante
/// assert_eq!(engine.pot(), 20);
///
/// engine.apply_action(Seat::Player, Action::Call).unwrap(); // check
/// engine.advance().unwrap(); // opponent folds
/// assert_eq!(engine.phase(), Phase::NextRound);
/// assert_eq!(engine.player(Seat::Player).money(), 110);
/// ```
pub struct Engine {
    config: EngineConfig,
    rng: ChaCha20Rng,
    deck: Deck,
    /// Indexed by [`Seat::index`]
    players: [PlayerState; 2],
    pot: u32,
    phase: Phase,
    round: u8,
    last_raise: u32,
    to_act: Option<Seat>,
    discarded: [BTreeSet<usize>; 2],
    revealed: bool,
    outcome: Option<RoundOutcome>,
    round_no: u32,
    events: Vec<GameEvent>,
    policy: Option<Box<dyn DecisionPolicy>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("round_no", &self.round_no)
            .field("pot", &self.pot)
            .field("players", &self.players)
            .field("to_act", &self.to_act)
            .field("policy", &self.policy_name())
            .finish()
    }
}

impl Engine {
    /// Creates an engine seeded from `config.seed`, or from OS entropy when
    /// no seed is set.
    pub fn new(config: EngineConfig, policy: Box<dyn DecisionPolicy>) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        Self::with_rng(config, policy, rng)
    }

    /// Creates an engine around a caller-supplied shuffle source.
    pub fn with_rng(
        config: EngineConfig,
        policy: Box<dyn DecisionPolicy>,
        rng: ChaCha20Rng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let money = config.starting_money;
        Ok(Self {
            config,
            rng,
            deck: Deck::new(),
            players: [PlayerState::new(money), PlayerState::new(money)],
            pot: 0,
            phase: Phase::RoundStart,
            round: 0,
            last_raise: 0,
            to_act: None,
            discarded: [BTreeSet::new(), BTreeSet::new()],
            revealed: false,
            outcome: None,
            round_no: 0,
            events: Vec::new(),
            policy: Some(policy),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn round(&self) -> u8 {
        self.round
    }
    pub fn round_no(&self) -> u32 {
        self.round_no
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn last_raise(&self) -> u32 {
        self.last_raise
    }
    pub fn to_act(&self) -> Option<Seat> {
        self.to_act
    }
    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat.index()]
    }
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Events emitted since the current round started.
    pub fn round_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Indices the seat has replaced this round, ascending.
    pub fn discarded(&self, seat: Seat) -> Vec<usize> {
        self.discarded[seat.index()].iter().copied().collect()
    }

    /// Sum of both balances, both current bets and the pot.
    pub fn total_chips(&self) -> u32 {
        self.pot + self.players.iter().map(PlayerState::total_chips).sum::<u32>()
    }

    pub fn policy_name(&self) -> Option<&str> {
        self.policy.as_deref().map(|p| p.name())
    }

    /// Installs a new policy and hands back the previous one.
    pub fn swap_policy(
        &mut self,
        policy: Box<dyn DecisionPolicy>,
    ) -> Option<Box<dyn DecisionPolicy>> {
        self.policy.replace(policy)
    }

    /// Removes the policy. The opponent cannot act until another is
    /// installed.
    pub fn dispose_policy(&mut self) -> Option<Box<dyn DecisionPolicy>> {
        self.policy.take()
    }

    pub fn observable_state(&self) -> RoundState {
        let view = |seat: Seat| {
            let p = &self.players[seat.index()];
            let visible = seat == Seat::Player || self.revealed;
            PlayerView {
                seat,
                money: p.money(),
                current_bet: p.current_bet(),
                has_acted: p.has_acted(),
                hand: if visible { p.hand().copied() } else { None },
                discarded: self.discarded(seat),
            }
        };
        RoundState {
            round_no: self.round_no,
            phase: self.phase,
            round: self.round,
            pot: self.pot,
            last_raise: self.last_raise,
            to_act: self.to_act,
            players: [view(Seat::Player), view(Seat::Opponent)],
            outcome: self.outcome.clone(),
        }
    }

    /// Category and tie-break of a seat's hand. The opponent's hand is
    /// hidden until showdown.
    pub fn hand_rank(&self, seat: Seat) -> Result<HandRank, GameError> {
        if seat == Seat::Opponent && !self.revealed {
            return Err(IllegalAction::HandHidden { seat }.into());
        }
        let hand = self.players[seat.index()]
            .hand()
            .ok_or(IllegalAction::NoHand)?;
        let eval = evaluate(hand);
        Ok(HandRank {
            category: eval.category,
            tiebreak: eval.tiebreak,
        })
    }

    /// Full re-initialisation: starting money for both seats, no round in
    /// progress. The shuffle source is reseeded when a seed is configured.
    pub fn restart(&mut self) {
        let money = self.config.starting_money;
        self.players = [PlayerState::new(money), PlayerState::new(money)];
        self.deck.reset();
        self.clear_round_state();
        self.phase = Phase::RoundStart;
        self.round_no = 0;
        self.events.clear();
        if let Some(seed) = self.config.seed {
            self.rng = ChaCha20Rng::seed_from_u64(seed);
        }
        debug!("engine restarted");
    }

    /// Shuffles, deals five cards to each seat (opponent first) and moves to
    /// the ante.
    pub fn start_round(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_phase(Phase::RoundStart)?;
        self.clear_round_state();
        for p in &mut self.players {
            p.reset_for_round();
        }
        self.events.clear();

        self.deck.shuffle(&mut self.rng);
        let dealt = self
            .deck
            .draw_n(2 * HAND_SIZE)
            .inspect_err(|_| error!("deck exhausted while dealing"))?;
        let mut hands = [[dealt[0]; HAND_SIZE]; 2];
        for (i, card) in dealt.into_iter().enumerate() {
            // alternate, opponent first
            let seat = if i % 2 == 0 { Seat::Opponent } else { Seat::Player };
            hands[seat.index()][i / 2] = card;
        }
        for seat in SEATS {
            self.players[seat.index()].set_hand(Hand::new(hands[seat.index()]));
        }

        self.round_no += 1;
        self.phase = Phase::Ante;
        self.push(GameEvent::RoundStarted {
            round_no: self.round_no,
        });
        self.push(GameEvent::CardsDealt {
            deck_remaining: self.deck.remaining(),
        });
        debug!(round_no = self.round_no, "round started");
        Ok(self.events.clone())
    }

    /// Performs the next transition that does not need the player seat.
    ///
    /// Returns [`IllegalAction::AwaitingAction`] without changing anything
    /// when the player must act first.
    pub fn advance(&mut self) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            Phase::RoundStart => self.start_round(),
            Phase::Ante => {
                let mark = self.events.len();
                self.post_ante();
                Ok(self.events[mark..].to_vec())
            }
            Phase::Betting => match self.to_act {
                Some(Seat::Opponent) => self.opponent_turn(),
                Some(seat) => Err(IllegalAction::AwaitingAction { seat }.into()),
                None => Err(IllegalAction::WrongPhase { phase: self.phase }.into()),
            },
            Phase::Discard => Err(IllegalAction::AwaitingAction { seat: Seat::Player }.into()),
            Phase::Showdown => {
                let mark = self.events.len();
                self.showdown();
                Ok(self.events[mark..].to_vec())
            }
            Phase::NextRound => {
                let mark = self.events.len();
                self.next_round();
                Ok(self.events[mark..].to_vec())
            }
            Phase::GameOver => Err(IllegalAction::GameOver.into()),
        }
    }

    /// Applies `action` for `seat`.
    ///
    /// Betting actions are accepted from whichever seat is to act; the
    /// discard phase accepts [`Action::Discard`] and [`Action::StandPat`]
    /// from the player seat (the opponent discards automatically).
    pub fn apply_action(&mut self, seat: Seat, action: Action) -> Result<Vec<GameEvent>, GameError> {
        let mark = self.events.len();
        match self.phase {
            Phase::GameOver => return Err(IllegalAction::GameOver.into()),
            Phase::Betting => {
                let expected = self
                    .to_act
                    .ok_or(IllegalAction::WrongPhase { phase: self.phase })?;
                if expected != seat {
                    return Err(IllegalAction::NotYourTurn {
                        expected,
                        actual: seat,
                    }
                    .into());
                }
                self.betting_action(seat, &action)?;
            }
            Phase::Discard => {
                if seat != Seat::Player {
                    return Err(IllegalAction::NotYourTurn {
                        expected: Seat::Player,
                        actual: seat,
                    }
                    .into());
                }
                match action {
                    Action::Discard(indices) => self.player_discard(indices)?,
                    Action::StandPat => self.open_betting(2, Seat::Opponent),
                    _ => return Err(IllegalAction::WrongPhase { phase: self.phase }.into()),
                }
            }
            phase => return Err(IllegalAction::WrongPhase { phase }.into()),
        }
        Ok(self.events[mark..].to_vec())
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), IllegalAction> {
        match self.phase {
            Phase::GameOver => Err(IllegalAction::GameOver),
            p if p == expected => Ok(()),
            phase => Err(IllegalAction::WrongPhase { phase }),
        }
    }

    fn clear_round_state(&mut self) {
        self.pot = 0;
        self.round = 0;
        self.last_raise = 0;
        self.to_act = None;
        self.discarded = [BTreeSet::new(), BTreeSet::new()];
        self.revealed = false;
        self.outcome = None;
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn post_ante(&mut self) {
        let ante = self.config.ante;
        for seat in SEATS {
            let paid = self.players[seat.index()].pay(ante);
            self.pot += paid;
            self.push(GameEvent::AntePosted { seat, amount: paid });
        }
        debug!(pot = self.pot, "ante posted");
        self.open_betting(0, Seat::Player);
    }

    /// Starts a betting round, or skips straight to showdown when neither
    /// seat has money left.
    fn open_betting(&mut self, round: u8, first: Seat) {
        self.round = round;
        self.last_raise = 0;
        for p in &mut self.players {
            p.set_acted(false);
        }
        if self.players.iter().all(PlayerState::is_all_in) {
            self.phase = Phase::Showdown;
            self.to_act = None;
            self.push(GameEvent::BettingSkipped { round });
            debug!(round, "betting skipped, both seats all-in");
            return;
        }
        self.phase = Phase::Betting;
        self.to_act = Some(first);
    }

    /// Betting situation from `seat`'s side of the table.
    pub fn betting_view(&self, seat: Seat) -> BettingView {
        let me = &self.players[seat.index()];
        let other = &self.players[seat.other().index()];
        BettingView {
            money: me.money(),
            current_bet: me.current_bet(),
            opponent_money: other.money(),
            opponent_bet: other.current_bet(),
            last_raise: self.last_raise,
            min_raise: self.config.min_raise,
        }
    }

    /// What a policy acting for `seat` gets to see.
    pub fn pot_context(&self, seat: Seat) -> PotContext {
        let view = self.betting_view(seat);
        PotContext {
            pot: self.pot + self.players.iter().map(PlayerState::current_bet).sum::<u32>(),
            to_call: view.to_call(),
            money: view.money,
            opponent_bet: view.opponent_bet,
            round: self.round,
        }
    }

    fn opponent_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let seat = Seat::Opponent;
        let hand = *self.players[seat.index()]
            .hand()
            .ok_or(IllegalAction::NoHand)?;
        let view = self.betting_view(seat);
        let ctx = self.pot_context(seat);
        let policy = self.policy.as_mut().ok_or(IllegalAction::NoPolicy)?;
        let decision = policy.decide(&hand, &ctx);
        let action = rules::resolve_decision(&decision, &view);
        debug!(
            policy = policy.name(),
            decided = decision.action.as_str(),
            strength = decision.strength,
            ?action,
            "opponent decision"
        );

        let mark = self.events.len();
        self.push(GameEvent::PolicyDecided { decision });
        if let Err(e) = self.betting_action(seat, &action) {
            self.events.truncate(mark);
            return Err(e);
        }
        Ok(self.events[mark..].to_vec())
    }

    /// Validates first; nothing below the validation can fail except deck
    /// exhaustion when the discard phase opens.
    fn betting_action(&mut self, seat: Seat, action: &Action) -> Result<(), GameError> {
        let resolved = rules::validate_action(&self.betting_view(seat), action)?;
        let (me, other) = (seat.index(), seat.other().index());
        match resolved {
            ResolvedAction::Fold | ResolvedAction::Check => {}
            ResolvedAction::Call(amount) => self.players[me].commit(amount),
            ResolvedAction::AllInCall { amount, refund } => {
                self.players[me].commit(amount);
                self.players[other].refund(refund);
            }
            ResolvedAction::Raise { to, chips } | ResolvedAction::AllInRaise { to, chips } => {
                self.players[me].commit(chips);
                self.last_raise = to;
                self.players[other].set_acted(false);
            }
        }
        self.players[me].set_acted(true);
        let round = self.round;
        self.push(GameEvent::Acted {
            seat,
            round,
            action: resolved.clone(),
        });

        if resolved == ResolvedAction::Fold {
            self.award_fold(seat.other());
            return Ok(());
        }
        if self.round == 0 {
            self.round = 1;
        }
        let settled = self.players.iter().all(PlayerState::has_acted)
            && self.players[0].current_bet() == self.players[1].current_bet();
        if settled {
            self.complete_betting()?;
        } else {
            self.to_act = Some(seat.other());
        }
        Ok(())
    }

    fn sweep_bets(&mut self) {
        let swept: u32 = self.players.iter_mut().map(PlayerState::take_bet).sum();
        self.pot += swept;
    }

    fn complete_betting(&mut self) -> Result<(), GameError> {
        self.sweep_bets();
        self.last_raise = 0;
        self.to_act = None;
        for p in &mut self.players {
            p.set_acted(false);
        }
        self.push(GameEvent::BettingComplete {
            round: self.round,
            pot: self.pot,
        });
        debug!(round = self.round, pot = self.pot, "betting complete");
        if self.round < 2 {
            self.enter_discard()
        } else {
            self.phase = Phase::Showdown;
            Ok(())
        }
    }

    fn enter_discard(&mut self) -> Result<(), GameError> {
        self.phase = Phase::Discard;
        let seat = Seat::Opponent;
        let hand = self.players[seat.index()]
            .hand()
            .ok_or(IllegalAction::NoHand)?;
        let indices = evaluate(hand).discards;
        self.replace_cards(seat, &indices)?;
        self.push(GameEvent::Discarded { seat, indices });
        self.to_act = Some(Seat::Player);
        Ok(())
    }

    fn player_discard(&mut self, mut indices: Vec<usize>) -> Result<(), GameError> {
        let seat = Seat::Player;
        let done = &self.discarded[seat.index()];
        let mut seen = BTreeSet::new();
        for &index in &indices {
            if index >= HAND_SIZE {
                return Err(IllegalAction::InvalidCardIndex { index }.into());
            }
            if !seen.insert(index) {
                return Err(IllegalAction::DuplicateCardIndex { index }.into());
            }
            if done.contains(&index) {
                return Err(IllegalAction::AlreadyDiscarded { index }.into());
            }
        }
        if indices.is_empty() {
            return Ok(());
        }
        indices.sort_unstable();
        self.replace_cards(seat, &indices)?;
        debug!(?indices, "player discarded");
        self.push(GameEvent::Discarded { seat, indices });
        Ok(())
    }

    /// Draws replacements into the given positions. Draws all cards before
    /// touching the hand so a short deck leaves the hand intact.
    fn replace_cards(&mut self, seat: Seat, indices: &[usize]) -> Result<(), GameError> {
        let fresh = self
            .deck
            .draw_n(indices.len())
            .inspect_err(|_| error!(?seat, "deck exhausted during discard"))?;
        let p = &mut self.players[seat.index()];
        let hand = p.hand_mut().ok_or(IllegalAction::NoHand)?;
        for (&i, card) in indices.iter().zip(fresh) {
            hand.replace(i, card);
        }
        self.discarded[seat.index()].extend(indices.iter().copied());
        Ok(())
    }

    fn award_fold(&mut self, winner: Seat) {
        self.sweep_bets();
        let amount = std::mem::take(&mut self.pot);
        self.players[winner.index()].add_money(amount);
        info!(winner = winner.as_str(), amount, "round won by fold");
        self.finish_round(RoundOutcome::Won {
            winner,
            amount,
            reason: WinReason::Fold,
        });
    }

    fn showdown(&mut self) {
        self.sweep_bets();
        self.revealed = true;
        let mut evals = Vec::with_capacity(2);
        for seat in SEATS {
            // both hands exist from the deal onward
            let Some(hand) = self.players[seat.index()].hand() else {
                continue;
            };
            let eval = evaluate(hand);
            self.push(GameEvent::HandRevealed {
                seat,
                category: eval.category,
                tiebreak: eval.tiebreak.clone(),
            });
            evals.push(eval);
        }
        let ordering = match evals.as_slice() {
            [p, o] => compare_hands(p, o),
            _ => Ordering::Equal,
        };
        let pot = std::mem::take(&mut self.pot);
        let outcome = match ordering {
            Ordering::Greater | Ordering::Less => {
                let winner = if ordering == Ordering::Greater {
                    Seat::Player
                } else {
                    Seat::Opponent
                };
                self.players[winner.index()].add_money(pot);
                info!(winner = winner.as_str(), amount = pot, "showdown won");
                RoundOutcome::Won {
                    winner,
                    amount: pot,
                    reason: WinReason::Showdown,
                }
            }
            Ordering::Equal => {
                let returned = match self.config.tie_policy {
                    TiePolicy::Forfeit => [0, 0],
                    TiePolicy::Split => {
                        let half = pot / 2;
                        [pot - half, half]
                    }
                };
                for seat in SEATS {
                    self.players[seat.index()].add_money(returned[seat.index()]);
                }
                info!(pot, tie_policy = self.config.tie_policy.as_str(), "showdown draw");
                RoundOutcome::Draw { pot, returned }
            }
        };
        self.finish_round(outcome);
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        self.phase = Phase::NextRound;
        self.to_act = None;
        self.outcome = Some(outcome.clone());
        self.push(GameEvent::RoundEnded { outcome });
    }

    fn next_round(&mut self) {
        let ante = self.config.ante;
        let short = [
            self.players[0].money() < ante,
            self.players[1].money() < ante,
        ];
        if short.iter().any(|s| *s) {
            let winner = match short {
                [true, false] => Some(Seat::Opponent),
                [false, true] => Some(Seat::Player),
                _ => None,
            };
            self.phase = Phase::GameOver;
            self.push(GameEvent::GameOver { winner });
            info!(winner = winner.map(Seat::as_str), "game over");
        } else {
            self.phase = Phase::RoundStart;
        }
    }
}
