//! Hierarchical model parts
//!
//! Parts live in a slot map and refer to their children by key. Rendering
//! walks the tree depth-first, pushing each part's customization so that
//! tasks and children see the composed global transform, and popping on the
//! way back out.

use slotmap::{new_key_type, SlotMap};

use crate::config::RenderConfig;
use crate::foundation::math::Vec3;
use crate::render::{DrawError, DrawHost, RenderTask};
use crate::scene::{PartCustomization, PartStack};

new_key_type! {
    /// Stable handle to a part in a [`PartTree`]
    pub struct PartKey;
}

/// A node of the model
#[derive(Debug, Clone)]
pub struct ModelPart {
    /// Part name, unique among siblings by convention only
    pub name: String,
    /// Local transform relative to the parent
    pub customization: PartCustomization,
    /// Invisible parts skip their tasks and their whole subtree
    pub visible: bool,
    children: Vec<PartKey>,
    tasks: Vec<RenderTask>,
}

impl ModelPart {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            customization: PartCustomization::new(),
            visible: true,
            children: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Set position, rotation, and scale and refresh the matrices
    pub fn set_transform(&mut self, pos: &Vec3, rot: &Vec3, scale: &Vec3) -> &mut Self {
        self.customization.set_pos(pos).set_rot(rot).set_scale(scale);
        self.customization.recalculate();
        self
    }

    /// Child keys in draw order
    pub fn children(&self) -> &[PartKey] {
        &self.children
    }

    /// Attached render tasks in draw order
    pub fn tasks(&self) -> &[RenderTask] {
        &self.tasks
    }

    /// Mutable access to the attached render tasks
    pub fn tasks_mut(&mut self) -> &mut [RenderTask] {
        &mut self.tasks
    }
}

/// Counters from one render walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Visible parts pushed onto the stack
    pub parts_visited: u32,
    /// Tasks that actually drew something
    pub tasks_drawn: u32,
    /// Quads drawn by those tasks
    pub complexity: u32,
    /// Tasks skipped because the complexity budget ran out
    pub tasks_skipped: u32,
}

/// Tree of model parts with a fixed root
#[derive(Debug, Clone)]
pub struct PartTree {
    parts: SlotMap<PartKey, ModelPart>,
    root: PartKey,
    config: RenderConfig,
}

impl PartTree {
    /// Create a tree holding only a root part
    pub fn new(root_name: impl Into<String>, config: RenderConfig) -> Self {
        let mut parts = SlotMap::with_key();
        let root = parts.insert(ModelPart::new(root_name));
        Self {
            parts,
            root,
            config,
        }
    }

    /// Root part key
    pub fn root(&self) -> PartKey {
        self.root
    }

    /// Number of parts, root included
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false, the root cannot be removed
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Render settings used by [`PartTree::render`]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Add a child part; returns `None` when `parent` is not in the tree
    pub fn add_part(&mut self, parent: PartKey, name: impl Into<String>) -> Option<PartKey> {
        if !self.parts.contains_key(parent) {
            return None;
        }
        let key = self.parts.insert(ModelPart::new(name));
        self.parts.get_mut(parent)?.children.push(key);
        Some(key)
    }

    /// Attach a render task to a part
    pub fn add_task(&mut self, part: PartKey, mut task: RenderTask) -> Option<usize> {
        task.set_unit_scale(self.config.block_unit_scale);
        let part = self.parts.get_mut(part)?;
        part.tasks.push(task);
        Some(part.tasks.len() - 1)
    }

    /// Remove a part and its subtree; the root is never removed
    pub fn remove_part(&mut self, key: PartKey) -> Option<ModelPart> {
        if key == self.root {
            return None;
        }
        let removed = self.parts.remove(key)?;
        for part in self.parts.values_mut() {
            part.children.retain(|&child| child != key);
        }
        let mut pending = removed.children.clone();
        while let Some(child) = pending.pop() {
            if let Some(part) = self.parts.remove(child) {
                pending.extend(part.children);
            }
        }
        Some(removed)
    }

    /// Part by key
    pub fn get(&self, key: PartKey) -> Option<&ModelPart> {
        self.parts.get(key)
    }

    /// Mutable part by key
    pub fn get_mut(&mut self, key: PartKey) -> Option<&mut ModelPart> {
        self.parts.get_mut(key)
    }

    /// First part with the given name, in depth-first order from the root
    pub fn find(&self, name: &str) -> Option<PartKey> {
        let mut pending = vec![self.root];
        while let Some(key) = pending.pop() {
            let part = self.parts.get(key)?;
            if part.name == name {
                return Some(key);
            }
            pending.extend(part.children.iter().rev());
        }
        None
    }

    /// Draw every visible part's tasks, starting at `start`
    ///
    /// Tasks that would push the frame's quad count past
    /// [`RenderConfig::max_complexity`] are skipped. The stack is left at the
    /// depth it had on entry, including when a draw fails.
    pub fn render<H: DrawHost + ?Sized>(
        &self,
        start: PartKey,
        stack: &mut PartStack,
        host: &mut H,
        light: u32,
        overlay: u32,
    ) -> Result<RenderStats, DrawError> {
        let mut stats = RenderStats::default();
        let mut walk = Walk {
            tree: self,
            host,
            light,
            overlay,
            stats: &mut stats,
        };
        walk.part(start, stack)?;

        if stats.tasks_skipped > 0 {
            log::warn!(
                "Complexity budget of {:?} exhausted, skipped {} render tasks",
                self.config.max_complexity,
                stats.tasks_skipped
            );
        }
        log::debug!(
            "Rendered {} parts, {} tasks, {} quads",
            stats.parts_visited,
            stats.tasks_drawn,
            stats.complexity
        );
        Ok(stats)
    }
}

struct Walk<'a, H: ?Sized> {
    tree: &'a PartTree,
    host: &'a mut H,
    light: u32,
    overlay: u32,
    stats: &'a mut RenderStats,
}

impl<H: DrawHost + ?Sized> Walk<'_, H> {
    fn part(&mut self, key: PartKey, stack: &mut PartStack) -> Result<(), DrawError> {
        let tree = self.tree;
        let part = match tree.parts.get(key) {
            Some(part) if part.visible => part,
            _ => return Ok(()),
        };
        self.stats.parts_visited += 1;
        let mut frame = stack.push_scoped(&part.customization);

        for task in &part.tasks {
            let cost = task.complexity();
            if !self.within_budget(cost) {
                self.stats.tasks_skipped += 1;
                continue;
            }
            if task.render(&mut frame, &mut *self.host, self.light, self.overlay)? {
                self.stats.tasks_drawn += 1;
                self.stats.complexity += cost;
            }
        }

        for &child in &part.children {
            self.part(child, &mut frame)?;
        }
        Ok(())
    }

    fn within_budget(&self, cost: u32) -> bool {
        match self.tree.config.max_complexity {
            Some(max) => self.stats.complexity.saturating_add(cost) <= max,
            None => true,
        }
    }
}
