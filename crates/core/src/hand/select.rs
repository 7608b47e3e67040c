use super::*;
use log::debug;

impl HandManager {
    /// Toggles selection of a hand or arithmetic card and returns the new
    /// state.
    pub fn activate(&mut self, id: CardId) -> Result<bool, HandError> {
        self.ensure_accepting_input()?;
        if let Some(selected) = self.arithmetic.toggle(id) {
            return Ok(selected);
        }
        let index = self.position_of(id)?;
        let slot = &mut self.slots[index];
        slot.selected = !slot.selected;
        Ok(slot.selected)
    }

    pub fn deselect_all(&mut self) -> Result<(), HandError> {
        self.ensure_accepting_input()?;
        for slot in &mut self.slots {
            slot.selected = false;
        }
        self.arithmetic.deselect_all();
        Ok(())
    }

    pub fn hover(&mut self, id: CardId) -> Result<(), HandError> {
        self.position_of(id)?;
        self.hovered = Some(id);
        Ok(())
    }

    pub fn unhover(&mut self, id: CardId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    /// Removes a card from the hand without refilling.
    pub fn discard(
        &mut self,
        id: CardId,
        observer: &mut impl TableObserver,
    ) -> Result<Card, HandError> {
        self.ensure_accepting_input()?;
        let index = self.position_of(id)?;
        let slot = self.slots.remove(index);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.phase == (HandPhase::Dragging { focus: id }) {
            self.phase = HandPhase::Idle;
        }
        if self.config.reshuffle_discards {
            self.deck.discard(vec![slot.card]);
        }
        debug!("discarded {} ({id})", slot.card);
        self.publish_hand(observer);
        Ok(slot.card)
    }

    pub fn discard_hovered(
        &mut self,
        observer: &mut impl TableObserver,
    ) -> Result<Option<Card>, HandError> {
        let Some(id) = self.hovered else {
            return Ok(None);
        };
        self.discard(id, observer).map(Some)
    }
}
