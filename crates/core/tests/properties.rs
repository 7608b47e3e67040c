use proptest::prelude::*;
use seqdeck_core::{
    evaluate, normalize_rank, CardId, CardIds, Deck, DeckError, DeckKind, HandManager, HandPhase,
    PlayOutcome, RngState, TableConfig, MAX_RANK, MIN_RANK,
};
use std::collections::HashSet;

fn sorted_ids(deck: &Deck) -> Vec<CardId> {
    let mut ids: Vec<CardId> = deck.draw.iter().map(|card| card.id).collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn fewer_than_three_ranks_satisfy_nothing(ranks in prop::collection::vec(any::<i32>(), 0..3)) {
        prop_assert!(evaluate(&ranks).is_empty());
    }

    #[test]
    fn normalize_is_idempotent_and_in_range(value in any::<i64>()) {
        let once = normalize_rank(value);
        prop_assert!((MIN_RANK..=MAX_RANK).contains(&once));
        prop_assert_eq!(normalize_rank(i64::from(once)), once);
    }

    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>(), rounds in 1usize..5) {
        let mut ids = CardIds::default();
        let mut deck = Deck::initialize(DeckKind::Regular, &TableConfig::default(), &mut ids)
            .expect("standard deck");
        let before = sorted_ids(&deck);
        let mut rng = RngState::from_seed(seed);
        for _ in 0..rounds {
            deck.shuffle(&mut rng);
        }
        prop_assert_eq!(deck.len(), 52);
        prop_assert_eq!(sorted_ids(&deck), before);
    }

    #[test]
    fn draw_shrinks_by_one_until_empty(seed in any::<u64>()) {
        let mut ids = CardIds::default();
        let mut deck = Deck::initialize(DeckKind::Arithmetic, &TableConfig::default(), &mut ids)
            .expect("arithmetic deck");
        deck.shuffle(&mut RngState::from_seed(seed));
        let mut expected = deck.len();
        while !deck.is_empty() {
            prop_assert!(deck.draw().is_ok());
            expected -= 1;
            prop_assert_eq!(deck.len(), expected);
        }
        prop_assert_eq!(deck.draw(), Err(DeckError::Empty(DeckKind::Arithmetic)));
    }

    #[test]
    fn plays_keep_hand_size_and_identity(
        seed in any::<u64>(),
        picks in prop::collection::vec(prop::collection::btree_set(0usize..10, 3..6), 1..12),
    ) {
        let mut hand = HandManager::new(TableConfig::default(), seed).expect("config");
        hand.start(&mut ()).expect("start");
        for pick in picks {
            hand.deselect_all().expect("idle");
            let indices: Vec<usize> = pick.into_iter().filter(|&i| i < hand.slots().len()).collect();
            for index in &indices {
                let id = hand.slots()[*index].card.id;
                hand.activate(id).expect("activate");
            }
            let previous = hand.slots().len();
            let drawable = hand.deck().len();
            match hand.play_selected(&mut ()) {
                Ok(PlayOutcome::Sequence(play)) => {
                    prop_assert_eq!(hand.phase(), HandPhase::Resolving);
                    hand.resume(&mut ()).expect("resume");
                    let expected = (previous - play.cards.len() + drawable).min(10);
                    prop_assert_eq!(hand.slots().len(), expected);
                }
                Ok(other) => prop_assert!(false, "unexpected outcome {:?}", other),
                Err(_) => prop_assert_eq!(hand.slots().len(), previous),
            }
            let ids: HashSet<CardId> = hand.slots().iter().map(|slot| slot.card.id).collect();
            prop_assert_eq!(ids.len(), hand.slots().len());
            prop_assert_eq!(hand.phase(), HandPhase::Idle);
        }
    }

    #[test]
    fn swap_exchanges_exactly_two_indices(
        seed in any::<u64>(),
        focus in 0usize..10,
        x in -1.0f32..11.0,
    ) {
        let mut hand = HandManager::new(TableConfig::default(), seed).expect("config");
        hand.start(&mut ()).expect("start");
        let before: Vec<(CardId, usize)> = hand
            .slots()
            .iter()
            .map(|slot| (slot.card.id, slot.visual_index))
            .collect();
        hand.begin_drag(before[focus].0).expect("drag");
        let swap = hand.drag_to(x, &mut ()).expect("tick");
        for (id, index) in before {
            let now = hand.slot(id).expect("in hand").visual_index;
            match swap {
                Some(report) if id == report.focus => prop_assert_eq!(now, report.to),
                Some(report) if id == report.crossed => prop_assert_eq!(now, report.from),
                _ => prop_assert_eq!(now, index),
            }
        }
    }
}
