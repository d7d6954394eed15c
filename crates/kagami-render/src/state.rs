use std::collections::{HashMap, VecDeque};

use kagami_types::{ContainerKind, RenderUpdate, TimeLabel};

use crate::template::{ReplaceKind, TemplateData, Templates};

/// Hard cap on the finalized-text log. Older entries fall off the tail
/// so the page never grows without bound.
pub const OUTPUT_LOG_LIMIT: usize = 200;

/// One rendered view node.
#[derive(Debug, Clone)]
pub struct ViewNode {
    pub id: u64,
    pub section: Option<String>,
    /// Scaffold rendered at creation; empty for output entries.
    pub shell: String,
    /// Latest rendered payload.
    pub body: String,
    /// Displayed time, refreshed on every write.
    pub time: Option<TimeLabel>,
}

/// Ordered nodes behind one mount point.
#[derive(Debug, Default)]
pub struct Container {
    nodes: VecDeque<ViewNode>,
}

impl Container {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in display order. For the output log that is newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ViewNode> {
        self.nodes.iter()
    }
}

/// The mount points the view contract guarantees at startup. Having
/// them by construction means event handling never has to probe for a
/// missing container.
#[derive(Debug, Default)]
pub struct Page {
    pub status: String,
    pub debug_images: Container,
    pub raw_texts: Container,
    pub output_texts: Container,
}

impl Page {
    pub fn container(&self, kind: ContainerKind) -> &Container {
        match kind {
            ContainerKind::DebugImages => &self.debug_images,
            ContainerKind::RawTexts => &self.raw_texts,
            ContainerKind::OutputTexts => &self.output_texts,
        }
    }

    fn container_mut(&mut self, kind: ContainerKind) -> &mut Container {
        match kind {
            ContainerKind::DebugImages => &mut self.debug_images,
            ContainerKind::RawTexts => &mut self.raw_texts,
            ContainerKind::OutputTexts => &mut self.output_texts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    section: String,
    kind: ReplaceKind,
}

/// Retained view model. All mutation funnels through the three
/// operations below, which each return the delta a frontend needs to
/// mirror the change.
pub struct RenderState {
    page: Page,
    /// Position of each (section, kind) slot inside its container.
    /// Slot nodes are never removed, so indices stay valid.
    slots: HashMap<SlotKey, usize>,
    templates: Box<dyn Templates>,
    next_node: u64,
}

impl RenderState {
    pub fn new(templates: Box<dyn Templates>) -> Self {
        Self {
            page: Page::default(),
            slots: HashMap::new(),
            templates,
            next_node: 0,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn status(&self) -> &str {
        &self.page.status
    }

    pub fn set_status(&mut self, text: &str) {
        self.page.status = text.to_string();
    }

    /// Create the (section, kind) slot on first sight, then overwrite
    /// its body and displayed time. Later events win regardless of
    /// their timestamps.
    pub fn upsert_replace(
        &mut self,
        section: &str,
        kind: ReplaceKind,
        data: &TemplateData<'_>,
        time: TimeLabel,
    ) -> RenderUpdate {
        let container_kind = kind.container();
        let key = SlotKey {
            section: section.to_string(),
            kind,
        };

        let (idx, created, shell) = match self.slots.get(&key).copied() {
            Some(idx) => (idx, false, String::new()),
            None => {
                let shell = self.templates.slot_shell(kind, section);
                let id = self.alloc_node();
                let container = self.page.container_mut(container_kind);
                container.nodes.push_back(ViewNode {
                    id,
                    section: Some(section.to_string()),
                    shell: shell.clone(),
                    body: String::new(),
                    time: None,
                });
                let idx = container.nodes.len() - 1;
                self.slots.insert(key, idx);
                (idx, true, shell)
            }
        };

        let body = self.templates.fragment(data);
        let node = &mut self.page.container_mut(container_kind).nodes[idx];
        node.body = body.clone();
        node.time = Some(time.clone());
        let id = node.id;

        RenderUpdate {
            container: container_kind,
            node: id,
            created,
            section: Some(section.to_string()),
            shell,
            body,
            time: Some(time),
            evicted: None,
        }
    }

    /// Insert a finalized text at the head of the output log, evicting
    /// the oldest entry once the log is full.
    pub fn append_output(
        &mut self,
        section: &str,
        data: &TemplateData<'_>,
        time: TimeLabel,
    ) -> RenderUpdate {
        let body = self.templates.fragment(data);
        let id = self.alloc_node();

        let container = self.page.container_mut(ContainerKind::OutputTexts);
        container.nodes.push_front(ViewNode {
            id,
            section: Some(section.to_string()),
            shell: String::new(),
            body: body.clone(),
            time: Some(time.clone()),
        });

        let evicted = if container.nodes.len() > OUTPUT_LOG_LIMIT {
            container.nodes.pop_back().map(|node| node.id)
        } else {
            None
        };

        RenderUpdate {
            container: ContainerKind::OutputTexts,
            node: id,
            created: true,
            section: Some(section.to_string()),
            shell: String::new(),
            body,
            time: Some(time),
            evicted,
        }
    }

    fn alloc_node(&mut self) -> u64 {
        let id = self.next_node;
        self.next_node += 1;
        id
    }
}
