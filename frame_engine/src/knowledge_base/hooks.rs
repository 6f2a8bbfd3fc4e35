//! Post-mutation hooks.
//!
//! A hook is keyed by a slot name and a predicate over the updated frame.
//! After `KnowledgeBase::update_slot` writes a value, every registered hook
//! whose slot matches and whose predicate accepts the frame is fired once.
//! Hooks edit frames directly, so their own writes never re-trigger hooks.

use frame_model::Frame;

use super::KnowledgeBase;
use crate::config::SpoilageConfig;

/// The slot update that fired a hook.
#[derive(Debug, Clone, Copy)]
pub struct HookTrigger<'a> {
    pub frame: &'a str,
    pub slot: &'a str,
    pub value: &'a str,
}

/// A side effect run after a slot update.
pub trait SlotHook: std::fmt::Debug + Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Slot whose update fires this hook.
    fn slot(&self) -> &str;

    /// Classification predicate over the frame that was updated.
    fn applies_to(&self, kb: &KnowledgeBase, frame: &Frame) -> bool;

    /// Run the side effect. Returns the number of frames changed.
    fn fire(&self, kb: &mut KnowledgeBase, trigger: HookTrigger<'_>) -> usize;
}

/// Ages spoilable instances when the calendar day advances.
///
/// Each firing decrements the lifespan of every unspoiled instance under the
/// spoilable class. An instance whose lifespan reaches zero is marked spoiled
/// and stamped with the day value that triggered it. Instances without a
/// numeric lifespan are left alone.
#[derive(Debug, Clone)]
pub struct SpoilageHook {
    config: SpoilageConfig,
}

impl SpoilageHook {
    pub fn new(config: SpoilageConfig) -> Self {
        Self { config }
    }

    fn is_spoiled(&self, frame: &Frame) -> bool {
        frame
            .slot(&self.config.spoiled_slot)
            .and_then(|slot| slot.value())
            .is_some_and(|value| value == "TRUE")
    }

    fn lifespan(&self, frame: &Frame) -> Option<i64> {
        frame
            .slot(&self.config.lifespan_slot)
            .and_then(|slot| slot.value())
            .and_then(|value| value.parse().ok())
    }
}

impl Default for SpoilageHook {
    fn default() -> Self {
        Self::new(SpoilageConfig::default())
    }
}

impl SlotHook for SpoilageHook {
    fn name(&self) -> &str {
        "spoilage"
    }

    fn slot(&self) -> &str {
        &self.config.day_slot
    }

    fn applies_to(&self, kb: &KnowledgeBase, frame: &Frame) -> bool {
        kb.derives_from(&frame.name, &self.config.calendar_class)
    }

    fn fire(&self, kb: &mut KnowledgeBase, trigger: HookTrigger<'_>) -> usize {
        let targets: Vec<(String, i64)> = kb
            .instance_frames()
            .filter(|frame| kb.derives_from(&frame.name, &self.config.spoilable_class))
            .filter(|frame| !self.is_spoiled(frame))
            .filter_map(|frame| self.lifespan(frame).map(|days| (frame.name.clone(), days)))
            .collect();

        for (name, days) in &targets {
            let Some(frame) = kb.get_frame_mut(name) else {
                continue;
            };
            let remaining = (days - 1).max(0);
            frame.update_slot(&self.config.lifespan_slot, remaining.to_string());
            if remaining == 0 {
                frame.update_slot(&self.config.spoiled_slot, "TRUE");
                frame.update_slot(&self.config.spoiled_on_slot, trigger.value);
                tracing::debug!(frame = %name, day = trigger.value, "frame spoiled");
            }
        }

        targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_model::Slot;

    fn pantry() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        kb.register_hook(SpoilageHook::default());

        kb.add_frame(Frame::class("CALENDAR"));
        kb.add_frame(Frame::instance("TODAY").with_superclass("CALENDAR"));
        kb.add_frame(Frame::class("FOOD"));
        kb.add_frame(Frame::class("DAIRY").with_superclass("FOOD"));
        kb.add_frame(
            Frame::instance("MILK")
                .with_superclass("DAIRY")
                .with_slot("LIFESPAN", Slot::with_value("2")),
        );
        kb.add_frame(
            Frame::instance("ROCK").with_slot("LIFESPAN", Slot::with_value("2")),
        );
        kb
    }

    fn slot_value(kb: &KnowledgeBase, frame: &str, slot: &str) -> Option<String> {
        kb.get_frame(frame)?.slot(slot)?.value().map(str::to_string)
    }

    #[test]
    fn test_day_update_decrements_lifespan() {
        let mut kb = pantry();

        kb.update_slot("TODAY", "DAY", "1");

        assert_eq!(slot_value(&kb, "MILK", "LIFESPAN").as_deref(), Some("1"));
        assert_eq!(slot_value(&kb, "ROCK", "LIFESPAN").as_deref(), Some("2"));
        assert!(slot_value(&kb, "MILK", "SPOILED").is_none());
    }

    #[test]
    fn test_spoiled_at_zero_and_stamped() {
        let mut kb = pantry();

        kb.update_slot("TODAY", "DAY", "1");
        kb.update_slot("TODAY", "DAY", "2");

        assert_eq!(slot_value(&kb, "MILK", "LIFESPAN").as_deref(), Some("0"));
        assert_eq!(slot_value(&kb, "MILK", "SPOILED").as_deref(), Some("TRUE"));
        assert_eq!(slot_value(&kb, "MILK", "SPOILED_ON").as_deref(), Some("2"));

        // Spoiled food stops aging.
        kb.update_slot("TODAY", "DAY", "3");
        assert_eq!(slot_value(&kb, "MILK", "SPOILED_ON").as_deref(), Some("2"));
    }

    #[test]
    fn test_other_slots_and_frames_do_not_fire() {
        let mut kb = pantry();

        kb.update_slot("TODAY", "WEATHER", "RAIN");
        kb.update_slot("ROCK", "DAY", "1");

        assert_eq!(slot_value(&kb, "MILK", "LIFESPAN").as_deref(), Some("2"));
    }

    #[test]
    fn test_non_numeric_lifespan_is_skipped() {
        let mut kb = pantry();
        kb.update_slot("MILK", "LIFESPAN", "FOREVER");

        kb.update_slot("TODAY", "DAY", "1");

        assert_eq!(slot_value(&kb, "MILK", "LIFESPAN").as_deref(), Some("FOREVER"));
    }

    #[test]
    fn test_custom_hook_registration() {
        #[derive(Debug)]
        struct Stamp;

        impl SlotHook for Stamp {
            fn name(&self) -> &str {
                "stamp"
            }
            fn slot(&self) -> &str {
                "COLOR"
            }
            fn applies_to(&self, _kb: &KnowledgeBase, frame: &Frame) -> bool {
                frame.is_instance()
            }
            fn fire(&self, kb: &mut KnowledgeBase, trigger: HookTrigger<'_>) -> usize {
                match kb.get_frame_mut(trigger.frame) {
                    Some(frame) => {
                        frame.update_slot("PAINTED", "TRUE");
                        1
                    }
                    None => 0,
                }
            }
        }

        let mut kb = KnowledgeBase::new();
        kb.register_hook(Stamp);
        kb.add_frame(Frame::instance("WALL"));
        kb.add_frame(Frame::class("PAINT"));

        kb.update_slot("WALL", "COLOR", "RED");
        kb.update_slot("PAINT", "COLOR", "RED");

        assert_eq!(slot_value(&kb, "WALL", "PAINTED").as_deref(), Some("TRUE"));
        assert!(slot_value(&kb, "PAINT", "PAINTED").is_none());
    }
}
