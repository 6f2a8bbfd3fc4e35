//! Knowledge Base - the frame graph and its invariant maintenance.

use frame_model::{Facet, Frame, FrameType, Slot};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::sync::Arc;

use super::{HookTrigger, Outcome, SlotHook, SpoilageHook};
use crate::config::KbConfig;

/// The main knowledge base structure.
///
/// Frames live in two disjoint tables keyed by name. The knowledge base keeps
/// superclass/subclass links symmetric whenever both ends exist, copies
/// superclass slots down when a frame is added, and runs registered hooks
/// after slot updates.
///
/// Deleting or renaming a frame does not rewrite references to it held by
/// other frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    class_frames: BTreeMap<String, Frame>,
    instance_frames: BTreeMap<String, Frame>,

    #[serde(skip, default = "default_auto_vivify")]
    auto_vivify: bool,

    #[serde(skip)]
    hooks: Vec<Arc<dyn SlotHook>>,
}

fn default_auto_vivify() -> bool {
    true
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            class_frames: BTreeMap::new(),
            instance_frames: BTreeMap::new(),
            auto_vivify: default_auto_vivify(),
            hooks: Vec::new(),
        }
    }
}

impl KnowledgeBase {
    /// Create a new empty knowledge base with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a knowledge base with built-in hooks registered per `config`.
    pub fn from_config(config: &KbConfig) -> Self {
        let mut kb = Self {
            auto_vivify: config.auto_vivify,
            ..Self::default()
        };
        if config.spoilage.enabled {
            kb.register_hook(SpoilageHook::new(config.spoilage.clone()));
        }
        kb
    }

    /// Register a post-mutation hook.
    pub fn register_hook(&mut self, hook: impl SlotHook + 'static) {
        tracing::debug!(hook = hook.name(), slot = hook.slot(), "hook registered");
        self.hooks.push(Arc::new(hook));
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    // ==================== LOOKUP ====================

    /// Get a frame from either table.
    pub fn get_frame(&self, name: &str) -> Option<&Frame> {
        self.class_frames
            .get(name)
            .or_else(|| self.instance_frames.get(name))
    }

    /// Get a mutable frame from either table.
    ///
    /// Edits made through this reference bypass link maintenance and hooks.
    pub fn get_frame_mut(&mut self, name: &str) -> Option<&mut Frame> {
        match self.class_frames.get_mut(name) {
            Some(frame) => Some(frame),
            None => self.instance_frames.get_mut(name),
        }
    }

    pub fn has_frame(&self, name: &str) -> bool {
        self.class_frames.contains_key(name) || self.instance_frames.contains_key(name)
    }

    /// All class frames, ordered by name.
    pub fn class_frames(&self) -> impl Iterator<Item = &Frame> {
        self.class_frames.values()
    }

    /// All instance frames, ordered by name.
    pub fn instance_frames(&self) -> impl Iterator<Item = &Frame> {
        self.instance_frames.values()
    }

    /// Get the total number of frames.
    pub fn frame_count(&self) -> usize {
        self.class_frames.len() + self.instance_frames.len()
    }

    /// True when `name` is `ancestor` or reaches it through superclass links.
    ///
    /// Walks stored links transitively; a link to a missing frame still
    /// counts by name but is not followed further.
    pub fn derives_from(&self, name: &str, ancestor: &str) -> bool {
        if name == ancestor {
            return true;
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([name]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(frame) = self.get_frame(current) else {
                continue;
            };
            for parent in &frame.superclasses {
                if parent == ancestor {
                    return true;
                }
                queue.push_back(parent.as_str());
            }
        }

        false
    }

    // ==================== FRAMES ====================

    /// Add a frame and propagate inheritance from its superclasses.
    ///
    /// Missing superclasses are created as empty classes. Each existing
    /// superclass gains the frame as a subclass and has its slots copied down
    /// with `update_slot` semantics. The superclasses of those superclasses
    /// are folded into the new frame's own set, one level deep.
    pub fn add_frame(&mut self, mut frame: Frame) -> Outcome {
        if self.has_frame(&frame.name) {
            return Outcome::AlreadyExists;
        }

        let name = frame.name.clone();
        let direct: Vec<String> = frame.superclasses.iter().cloned().collect();
        let mut ancestors: BTreeSet<String> = BTreeSet::new();

        for parent_name in &direct {
            if *parent_name == name {
                frame.superclasses.remove(parent_name);
                continue;
            }

            match self.get_frame_mut(parent_name) {
                None => {
                    let mut parent = Frame::class(parent_name.clone());
                    parent.add_subclass(&name);
                    self.class_frames.insert(parent_name.clone(), parent);
                    tracing::debug!(frame = %parent_name, subclass = %name, "superclass auto-created");
                }
                Some(parent) if parent.is_instance() => {
                    tracing::warn!(frame = %name, instance = %parent_name, "superclass is an instance, link dropped");
                    frame.superclasses.remove(parent_name);
                }
                Some(parent) => {
                    parent.add_subclass(&name);
                    for (slot_name, slot) in &parent.slots {
                        inherit_slot(&mut frame, slot_name, slot);
                    }
                    ancestors.extend(parent.superclasses.iter().cloned());
                }
            }
        }

        for ancestor in ancestors {
            if ancestor == name || !frame.add_superclass(&ancestor) {
                continue;
            }
            match self.get_frame_mut(&ancestor) {
                Some(parent) if parent.is_instance() => {
                    frame.superclasses.remove(&ancestor);
                }
                Some(parent) => {
                    parent.add_subclass(&name);
                }
                None => {}
            }
        }

        tracing::debug!(
            frame = %name,
            id = %frame.id,
            frame_type = %frame.frame_type,
            supers = frame.superclasses.len(),
            slots = frame.slots.len(),
            "frame added"
        );
        self.insert(frame);
        Outcome::Applied
    }

    /// Remove a frame. References held by other frames are left in place.
    pub fn delete_frame(&mut self, name: &str) -> Outcome {
        match self.take_frame(name) {
            Some(frame) => {
                tracing::debug!(frame = %name, id = %frame.id, "frame deleted");
                Outcome::Applied
            }
            None => Outcome::FrameNotFound,
        }
    }

    /// Move a frame to the other table. Inheritance is not re-run.
    ///
    /// A class that still has subclasses cannot become an instance.
    pub fn update_type(&mut self, name: &str, new_type: FrameType) -> Outcome {
        match self.get_frame(name) {
            None => return Outcome::FrameNotFound,
            Some(frame) if new_type == FrameType::Instance && !frame.subclasses.is_empty() => {
                return Outcome::InstanceSpecialization;
            }
            Some(_) => {}
        }

        if let Some(mut frame) = self.take_frame(name) {
            frame.frame_type = new_type;
            tracing::debug!(frame = %name, frame_type = %new_type, "frame retyped");
            self.insert(frame);
        }
        Outcome::Applied
    }

    /// Rename a frame. References held by other frames keep the old name.
    pub fn update_name(&mut self, name: &str, new_name: &str) -> Outcome {
        if !self.has_frame(name) {
            return Outcome::FrameNotFound;
        }
        if self.has_frame(new_name) {
            return Outcome::AlreadyExists;
        }

        if let Some(mut frame) = self.take_frame(name) {
            frame.name = new_name.to_string();
            tracing::debug!(frame = %name, new_name, id = %frame.id, "frame renamed");
            self.insert(frame);
        }
        Outcome::Applied
    }

    // ==================== LINKS ====================

    /// Link `frame` under `parent`, updating both ends.
    pub fn add_superclass(&mut self, frame: &str, parent: &str) -> Outcome {
        if !self.has_frame(frame) {
            return Outcome::FrameNotFound;
        }
        if frame == parent {
            return Outcome::SelfLink;
        }
        if self.get_frame(parent).is_some_and(Frame::is_instance) {
            return Outcome::InstanceSpecialization;
        }

        let auto_vivify = self.auto_vivify;
        let added = self
            .get_frame_mut(frame)
            .is_some_and(|child| child.add_superclass(parent));
        if !added {
            return Outcome::AlreadyExists;
        }

        match self.get_frame_mut(parent) {
            Some(parent_frame) => {
                parent_frame.add_subclass(frame);
            }
            None if auto_vivify => {
                let mut parent_frame = Frame::class(parent);
                parent_frame.add_subclass(frame);
                self.class_frames.insert(parent.to_string(), parent_frame);
                tracing::debug!(frame = %parent, subclass = %frame, "superclass auto-created");
            }
            None => {}
        }

        tracing::debug!(frame, parent, "superclass added");
        Outcome::Applied
    }

    pub fn remove_superclass(&mut self, frame: &str, parent: &str) -> Outcome {
        let Some(child) = self.get_frame_mut(frame) else {
            return Outcome::FrameNotFound;
        };
        if !child.remove_superclass(parent) {
            return Outcome::NotPresent;
        }
        if let Some(parent_frame) = self.get_frame_mut(parent) {
            parent_frame.remove_subclass(frame);
        }

        tracing::debug!(frame, parent, "superclass removed");
        Outcome::Applied
    }

    /// Link `child` under `frame`, updating both ends. Instances cannot
    /// take subclasses.
    pub fn add_subclass(&mut self, frame: &str, child: &str) -> Outcome {
        let Some(parent) = self.get_frame_mut(frame) else {
            return Outcome::FrameNotFound;
        };
        if parent.is_instance() {
            return Outcome::InstanceSpecialization;
        }
        if frame == child {
            return Outcome::SelfLink;
        }
        if !parent.add_subclass(child) {
            return Outcome::AlreadyExists;
        }
        let auto_vivify = self.auto_vivify;

        match self.get_frame_mut(child) {
            Some(child_frame) => {
                child_frame.add_superclass(frame);
            }
            None if auto_vivify => {
                let child_frame = Frame::class(child).with_superclass(frame);
                self.class_frames.insert(child.to_string(), child_frame);
                tracing::debug!(frame = %child, parent = %frame, "subclass auto-created");
            }
            None => {}
        }

        tracing::debug!(frame, child, "subclass added");
        Outcome::Applied
    }

    pub fn remove_subclass(&mut self, frame: &str, child: &str) -> Outcome {
        let Some(parent) = self.get_frame_mut(frame) else {
            return Outcome::FrameNotFound;
        };
        if parent.is_instance() {
            return Outcome::InstanceSpecialization;
        }
        if !parent.remove_subclass(child) {
            return Outcome::NotPresent;
        }
        if let Some(child_frame) = self.get_frame_mut(child) {
            child_frame.remove_superclass(frame);
        }

        tracing::debug!(frame, child, "subclass removed");
        Outcome::Applied
    }

    // ==================== SLOTS ====================

    /// Create a slot. An existing slot of that name is left untouched.
    pub fn add_slot(&mut self, frame: &str, slot: &str, value: Slot) -> Outcome {
        let Some(target) = self.get_frame_mut(frame) else {
            return Outcome::FrameNotFound;
        };
        if !target.add_slot(slot, value) {
            return Outcome::AlreadyExists;
        }

        tracing::debug!(frame, slot, "slot added");
        Outcome::Applied
    }

    /// Overwrite a slot's primary value, creating the slot if needed, then
    /// fire matching hooks.
    pub fn update_slot(&mut self, frame: &str, slot: &str, value: &str) -> Outcome {
        let Some(target) = self.get_frame_mut(frame) else {
            return Outcome::FrameNotFound;
        };
        target.update_slot(slot, value);
        tracing::debug!(frame, slot, value, "slot updated");

        self.run_hooks(HookTrigger { frame, slot, value });
        Outcome::Applied
    }

    pub fn delete_slot(&mut self, frame: &str, slot: &str) -> Outcome {
        self.edit_slot(frame, slot, Outcome::SlotNotFound, |target| {
            target.remove_slot(slot).is_some()
        })
    }

    /// Append a value. The `MULTIVALUED` facet is not checked.
    pub fn add_value(&mut self, frame: &str, slot: &str, value: &str) -> Outcome {
        self.edit_slot(frame, slot, Outcome::SlotNotFound, |target| {
            target.add_value(slot, value)
        })
    }

    pub fn delete_value(&mut self, frame: &str, slot: &str, value: &str) -> Outcome {
        self.edit_slot(frame, slot, Outcome::NotPresent, |target| {
            target.delete_value(slot, value)
        })
    }

    pub fn add_facet(&mut self, frame: &str, slot: &str, facet: Facet) -> Outcome {
        self.edit_slot(frame, slot, Outcome::AlreadyExists, |target| {
            target.add_facet(slot, facet)
        })
    }

    pub fn delete_facet(&mut self, frame: &str, slot: &str, facet: &Facet) -> Outcome {
        self.edit_slot(frame, slot, Outcome::NotPresent, |target| {
            target.delete_facet(slot, facet)
        })
    }

    // ==================== SNAPSHOTS ====================

    /// Serialize both frame tables to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Restore frame tables from JSON. Hooks are not restored.
    ///
    /// Rejects snapshots where a name is in both tables, a key differs from
    /// its frame's name, or a frame sits in the wrong table.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let kb: Self = serde_json::from_str(json)?;
        kb.check_tables().map_err(serde_json::Error::custom)?;
        Ok(kb)
    }

    // ==================== INTERNALS ====================

    fn check_tables(&self) -> Result<(), String> {
        let tables = [
            (FrameType::Class, &self.class_frames),
            (FrameType::Instance, &self.instance_frames),
        ];
        for (frame_type, table) in tables {
            for (key, frame) in table {
                if *key != frame.name {
                    return Err(format!("frame {} stored under key {}", frame.name, key));
                }
                if frame.frame_type != frame_type {
                    return Err(format!("{} frame {} in {} table", frame.frame_type, key, frame_type));
                }
            }
        }
        match self
            .class_frames
            .keys()
            .find(|name| self.instance_frames.contains_key(*name))
        {
            Some(name) => Err(format!("frame {} is both a class and an instance", name)),
            None => Ok(()),
        }
    }

    fn insert(&mut self, frame: Frame) {
        let table = match frame.frame_type {
            FrameType::Class => &mut self.class_frames,
            FrameType::Instance => &mut self.instance_frames,
        };
        table.insert(frame.name.clone(), frame);
    }

    fn take_frame(&mut self, name: &str) -> Option<Frame> {
        self.class_frames
            .remove(name)
            .or_else(|| self.instance_frames.remove(name))
    }

    /// Shared lookup for slot-level pass-throughs. `refused` is reported when
    /// the frame and slot exist but `edit` changes nothing.
    fn edit_slot<F>(&mut self, frame: &str, slot: &str, refused: Outcome, edit: F) -> Outcome
    where
        F: FnOnce(&mut Frame) -> bool,
    {
        let Some(target) = self.get_frame_mut(frame) else {
            return Outcome::FrameNotFound;
        };
        if !target.has_slot(slot) {
            return Outcome::SlotNotFound;
        }
        if !edit(target) {
            return refused;
        }

        tracing::debug!(frame, slot, "slot edited");
        Outcome::Applied
    }

    fn run_hooks(&mut self, trigger: HookTrigger<'_>) {
        let hooks: Vec<Arc<dyn SlotHook>> = self
            .hooks
            .iter()
            .filter(|hook| hook.slot() == trigger.slot)
            .cloned()
            .collect();

        for hook in hooks {
            let applies = self
                .get_frame(trigger.frame)
                .is_some_and(|frame| hook.applies_to(self, frame));
            if !applies {
                continue;
            }
            let touched = hook.fire(self, trigger);
            tracing::info!(hook = hook.name(), frame = trigger.frame, touched, "hook fired");
        }
    }
}

/// Copy one superclass slot onto a new frame with `update_slot` semantics:
/// a missing slot is copied whole, an existing one takes the primary value.
fn inherit_slot(frame: &mut Frame, name: &str, slot: &Slot) {
    match frame.slots.get_mut(name) {
        Some(own) => {
            if let Some(value) = slot.value() {
                own.set_primary(value);
            }
        }
        None => {
            frame.slots.insert(name.to_string(), slot.clone());
        }
    }
}
