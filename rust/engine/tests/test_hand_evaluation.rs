use fivedraw_engine::cards::{Card, Rank as R, Suit as S};
use fivedraw_engine::hand::{compare_hands, evaluate, Hand, HandCategory};

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

fn eval(s: &str) -> fivedraw_engine::hand::Evaluation {
    evaluate(&s.parse::<Hand>().unwrap())
}

#[test]
fn detects_straight_flush_not_quads() {
    let hand = Hand::new([
        c(S::Hearts, R::Nine),
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::King),
    ]);
    let e = evaluate(&hand);
    assert_eq!(e.category, HandCategory::StraightFlush);
    assert!(e.discards.is_empty());
}

#[test]
fn wheel_is_the_lowest_straight() {
    let wheel = eval("As 2d 3c 4h 5s");
    assert_eq!(wheel.category, HandCategory::Straight);
    assert_eq!(wheel.tiebreak.as_slice(), &[3, 2, 1, 0, 12]);

    let six_high = eval("2s 3d 4c 5h 6s");
    assert!(compare_hands(&six_high, &wheel).is_gt());

    let steel_wheel = eval("Ah 2h 3h 4h 5h");
    assert_eq!(steel_wheel.category, HandCategory::StraightFlush);
}

#[test]
fn category_ordering_is_correct() {
    let two_pair = eval("As Ad Ks Kd 2c");
    let one_pair = eval("Ah Ac Qs Jd 2d");
    let full_house = eval("Kh Kc Kd 2s 2h");
    assert_eq!(two_pair.category, HandCategory::TwoPair);
    assert!(compare_hands(&two_pair, &one_pair).is_gt());
    assert!(compare_hands(&two_pair, &full_house).is_lt());

    let flush = eval("2h 7h 9h Jh Kh");
    let straight = eval("9s 10d Jc Qh Ks");
    assert!(compare_hands(&flush, &straight).is_gt());
}

#[test]
fn exactly_one_category_per_hand() {
    let cases = [
        ("2s 5d 9c Jh Ks", HandCategory::HighCard),
        ("2s 2d 9c Jh Ks", HandCategory::OnePair),
        ("2s 2d 9c 9h Ks", HandCategory::TwoPair),
        ("2s 2d 2c Jh Ks", HandCategory::ThreeOfAKind),
        ("6s 7d 8c 9h 10s", HandCategory::Straight),
        ("2s 5s 9s Js Ks", HandCategory::Flush),
        ("2s 2d 2c Kh Ks", HandCategory::FullHouse),
        ("2s 2d 2c 2h Ks", HandCategory::FourOfAKind),
        ("6d 7d 8d 9d 10d", HandCategory::StraightFlush),
    ];
    for (hand, expected) in cases {
        assert_eq!(eval(hand).category, expected, "{hand}");
        assert_eq!(eval(hand).category.value(), expected as u8);
    }
}

#[test]
fn kickers_break_ties_within_a_category() {
    let a = eval("Qs Qd 9c 5h 3s");
    let b = eval("Qh Qc 9d 5s 2s");
    assert!(compare_hands(&a, &b).is_gt());

    let c1 = eval("Ks Kd 4c 4h As");
    let c2 = eval("Kh Kc 4d 4s Qs");
    assert!(compare_hands(&c1, &c2).is_gt());
}

#[test]
fn identical_ranks_in_other_suits_tie() {
    let a = eval("As Kd Qh 9c 7s");
    let b = eval("Ah Kc Qd 9s 7h");
    assert!(compare_hands(&a, &b).is_eq());
}

#[test]
fn one_pair_discards_three_unpaired_cards() {
    let hand: Hand = "9s Kd 9h 4c 2s".parse().unwrap();
    let e = evaluate(&hand);
    assert_eq!(e.category, HandCategory::OnePair);
    assert_eq!(e.discards, vec![1, 3, 4]);
    assert!(e.discards.iter().all(|&i| hand[i].rank != R::Nine));
}

#[test]
fn discard_advice_per_category() {
    // two pair keeps both pairs, trips keeps the set
    assert_eq!(eval("9s Kd 9h Kc 2s").discards, vec![4]);
    assert_eq!(eval("9s 9d 9h Kc 2s").discards, vec![3, 4]);
    // made hands stand pat
    assert!(eval("2s 5s 9s Js Ks").discards.is_empty());
    assert!(eval("2s 2d 2c Kh Ks").discards.is_empty());
}

#[test]
fn info_set_key_matches_category_and_tiebreak() {
    assert_eq!(eval("9s Kd 9h 4c 2s").info_set_key(), "2-7-11-2-0");
    assert_eq!(eval("As 2d 3c 4h 5s").info_set_key(), "5-3-2-1-0-12");
}
