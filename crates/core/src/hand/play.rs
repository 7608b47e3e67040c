use super::*;
use crate::{apply_arithmetic, evaluate, Outcome, RefillReport, SequenceSet, Tier, TransformReport};
use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePlay {
    pub cards: Vec<Card>,
    pub ranks: Vec<i32>,
    pub categories: SequenceSet,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    Sequence(SequencePlay),
    Transform(TransformReport),
    /// An arithmetic card was selected without any hand targets.
    Ignored,
}

impl HandManager {
    /// Validates and commits the current selection. Nothing is mutated unless
    /// the play is accepted; accepted plays leave a continuation pending that
    /// must be resumed before the next play.
    pub fn play_selected(
        &mut self,
        observer: &mut impl TableObserver,
    ) -> Result<PlayOutcome, HandError> {
        match self.phase {
            HandPhase::Idle => {}
            HandPhase::Resolving => return Err(HandError::ConcurrentPlayRejected),
            dragging @ HandPhase::Dragging { .. } => return Err(HandError::InvalidPhase(dragging)),
        }
        if let Some(operator) = self.arithmetic.selected().map(|slot| slot.card) {
            return Ok(self.transform(operator, observer));
        }

        let selected = self.selected_slots();
        if selected.len() < self.config.min_play {
            let outcome = Outcome::TooFew {
                selected: selected.len(),
                required: self.config.min_play,
            };
            observer.report_outcome(&outcome);
            return Err(HandError::InsufficientSelection {
                selected: selected.len(),
                required: self.config.min_play,
            });
        }

        let ranks: Vec<i32> = selected
            .iter()
            .filter_map(|slot| slot.card.rank())
            .map(i32::from)
            .collect();
        let categories = evaluate(&ranks);
        debug!("ranks {ranks:?} satisfy {categories:?}");
        if categories.is_empty() {
            observer.report_outcome(&Outcome::Invalid);
            return Err(HandError::InvalidPattern);
        }

        let tier = Tier::classify(&categories, self.config.medium_tier_threshold);
        let cards: Vec<Card> = selected.iter().map(|slot| slot.card).collect();
        if tier != Tier::Base {
            for card in &cards {
                observer.emit_visual_effect(card, tier);
            }
        }
        observer.report_outcome(&Outcome::Sequence(categories.clone()));
        info!("played {} cards as {categories:?} at {tier:?}", cards.len());

        self.phase = HandPhase::Resolving;
        self.pending = Some(ScheduledTask {
            delay: self.config.replenish_delay(),
            continuation: Continuation::Replenish {
                played: cards.iter().map(|card| card.id).collect(),
            },
        });
        Ok(PlayOutcome::Sequence(SequencePlay {
            cards,
            ranks,
            categories,
            tier,
        }))
    }

    fn transform(&mut self, operator: Card, observer: &mut impl TableObserver) -> PlayOutcome {
        if !self.slots.iter().any(|slot| slot.selected) {
            return PlayOutcome::Ignored;
        }
        let mut targets: Vec<&mut HandSlot> =
            self.slots.iter_mut().filter(|slot| slot.selected).collect();
        targets.sort_by_key(|slot| slot.visual_index);
        let report = apply_arithmetic(&operator, targets.into_iter().map(|slot| &mut slot.card));
        for change in &report.changes {
            observer.on_rank_changed(change);
        }
        self.arithmetic.consume(operator.id);
        info!(
            "{} transformed {} cards ({} skipped)",
            operator,
            report.changes.len(),
            report.skipped.len()
        );

        self.phase = HandPhase::Resolving;
        self.pending = Some(ScheduledTask {
            delay: self.config.arithmetic_settle(),
            continuation: Continuation::RefillArithmetic,
        });
        self.publish_hand(observer);
        observer.on_arithmetic_changed(self.arithmetic.slots());
        PlayOutcome::Transform(report)
    }

    /// Runs the pending continuation to completion and returns to idle.
    pub fn resume(&mut self, observer: &mut impl TableObserver) -> Result<RefillReport, HandError> {
        let task = self.pending.take().ok_or(HandError::NothingPending)?;
        let report = match task.continuation {
            Continuation::Replenish { played } => {
                let mut removed = Vec::with_capacity(played.len());
                self.slots.retain(|slot| {
                    if played.contains(&slot.card.id) {
                        removed.push(slot.card);
                        false
                    } else {
                        true
                    }
                });
                if self.hovered.is_some_and(|id| played.contains(&id)) {
                    self.hovered = None;
                }
                if self.config.reshuffle_discards {
                    self.deck.discard(removed.clone());
                }
                self.last_played = removed;
                self.fill_hand(observer)
            }
            Continuation::RefillArithmetic => self.refill_arithmetic(observer),
        };
        self.phase = HandPhase::Idle;
        Ok(report)
    }

    /// Resumes whatever is pending, if anything.
    pub fn settle(&mut self, observer: &mut impl TableObserver) -> Option<RefillReport> {
        if self.pending.is_none() {
            return None;
        }
        self.resume(observer).ok()
    }
}
