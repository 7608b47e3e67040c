use super::*;
use log::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapReport {
    pub focus: CardId,
    pub crossed: CardId,
    pub from: usize,
    pub to: usize,
}

impl HandManager {
    pub fn begin_drag(&mut self, id: CardId) -> Result<(), HandError> {
        self.ensure_accepting_input()?;
        self.position_of(id)?;
        self.phase = HandPhase::Dragging { focus: id };
        Ok(())
    }

    /// One drag tick. `x` is the dragged card's horizontal position in slot
    /// units, where the slot at index `i` rests at `x == i`. At most one swap
    /// happens per tick. Swaps cannot overlap: each one finishes, observer
    /// callbacks included, before `&mut self` is released.
    pub fn drag_to(
        &mut self,
        x: f32,
        observer: &mut impl TableObserver,
    ) -> Result<Option<SwapReport>, HandError> {
        let HandPhase::Dragging { focus } = self.phase else {
            return Err(HandError::InvalidPhase(self.phase));
        };
        let focus_index = self.position_of(focus)?;
        let crossed = (0..self.slots.len()).find(|&index| {
            let slot_x = index as f32;
            (x > slot_x && focus_index < index) || (x < slot_x && focus_index > index)
        });
        Ok(crossed.map(|index| self.swap(focus_index, index, observer)))
    }

    pub fn end_drag(&mut self, observer: &mut impl TableObserver) -> Result<Settle, HandError> {
        let HandPhase::Dragging { focus } = self.phase else {
            return Err(HandError::InvalidPhase(self.phase));
        };
        let settle = self.slots[self.position_of(focus)?].settle();
        self.phase = HandPhase::Idle;
        observer.on_slot_settled(focus, settle);
        Ok(settle)
    }

    fn swap(
        &mut self,
        focus_index: usize,
        crossed_index: usize,
        observer: &mut impl TableObserver,
    ) -> SwapReport {
        self.slots.swap(focus_index, crossed_index);
        let crossed = self.slots[focus_index];
        observer.on_slot_settled(crossed.card.id, crossed.settle());

        let direction = if focus_index > crossed_index {
            SwapDirection::Right
        } else {
            SwapDirection::Left
        };
        observer.on_swap_cue(crossed.card.id, direction);
        self.publish_hand(observer);

        let report = SwapReport {
            focus: self.slots[crossed_index].card.id,
            crossed: crossed.card.id,
            from: focus_index,
            to: crossed_index,
        };
        debug!(
            "swapped {} from {} to {}, bypassing {}",
            report.focus, report.from, report.to, report.crossed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardKind, Event, EventBus, Suit};

    fn table() -> HandManager {
        let mut hand = HandManager::new(
            TableConfig {
                hand_size: 5,
                ..TableConfig::default()
            },
            1,
        )
        .unwrap();
        let regular = (1..=5)
            .map(|rank| CardKind::regular(Suit::Clubs, rank).unwrap())
            .collect();
        hand.start_stacked(regular, Vec::new(), &mut ()).unwrap();
        hand
    }

    fn ranks(hand: &HandManager) -> Vec<u8> {
        hand.slots().iter().filter_map(|slot| slot.card.rank()).collect()
    }

    #[test]
    fn dragging_right_swaps_with_neighbour() {
        let mut hand = table();
        let focus = hand.slots()[1].card.id;
        hand.begin_drag(focus).unwrap();
        let mut events = EventBus::default();
        assert_eq!(hand.drag_to(1.4, &mut events).unwrap(), None);
        let swap = hand.drag_to(2.2, &mut events).unwrap().unwrap();
        assert_eq!(swap.from, 1);
        assert_eq!(swap.to, 2);
        assert_eq!(ranks(&hand), vec![1, 3, 2, 4, 5]);
        assert!(events.events().contains(&Event::SwapCue {
            card: swap.crossed,
            direction: SwapDirection::Left,
        }));
        assert_eq!(hand.drag_to(2.2, &mut events).unwrap(), None);
    }

    #[test]
    fn dragging_left_exchanges_with_first_crossed_slot() {
        let mut hand = table();
        let focus = hand.slots()[4].card.id;
        hand.begin_drag(focus).unwrap();
        let swap = hand.drag_to(0.5, &mut ()).unwrap().unwrap();
        assert_eq!(swap.to, 1);
        assert_eq!(ranks(&hand), vec![1, 5, 3, 4, 2]);
        assert_eq!(hand.slot(focus).map(|slot| slot.visual_index), Some(1));
    }

    #[test]
    fn end_drag_settles_by_selection() {
        let mut hand = table();
        let focus = hand.slots()[0].card.id;
        hand.activate(focus).unwrap();
        hand.begin_drag(focus).unwrap();
        assert_eq!(hand.end_drag(&mut ()).unwrap(), Settle::Raised);
        assert_eq!(hand.phase(), HandPhase::Idle);
        assert!(matches!(
            hand.end_drag(&mut ()),
            Err(HandError::InvalidPhase(HandPhase::Idle))
        ));
    }

    #[test]
    fn long_drag_moves_one_slot_per_tick() {
        let mut hand = table();
        let focus = hand.slots()[0].card.id;
        hand.begin_drag(focus).unwrap();
        let mut targets = Vec::new();
        while let Some(swap) = hand.drag_to(4.5, &mut ()).unwrap() {
            assert_eq!(swap.to, swap.from + 1);
            targets.push(swap.to);
        }
        assert_eq!(targets, vec![1, 2, 3, 4]);
        assert_eq!(ranks(&hand), vec![2, 3, 4, 5, 1]);
    }

    #[test]
    fn failed_end_drag_keeps_drag_phase() {
        let mut hand = table();
        let gone = CardId(999);
        hand.phase = HandPhase::Dragging { focus: gone };
        assert!(matches!(
            hand.end_drag(&mut ()),
            Err(HandError::UnknownCard(id)) if id == gone
        ));
        assert_eq!(hand.phase(), HandPhase::Dragging { focus: gone });
    }

    #[test]
    fn drag_requires_drag_phase() {
        let mut hand = table();
        assert!(matches!(
            hand.drag_to(3.0, &mut ()),
            Err(HandError::InvalidPhase(HandPhase::Idle))
        ));
    }
}
