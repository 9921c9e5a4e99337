//! Page layout and reveal wiring
//!
//! Sections stack vertically inside a centred container. Each animated piece
//! of a section becomes one mounted element with a reveal registration:
//!
//! - Section headers fade in one row after another (0, 0.1, 0.2 s)
//! - Card grids cascade through a stagger group
//! - The hero animates on mount since it is above the fold
//! - Content sections are wrapped in a container that fires 100px inside
//!   the viewport

use crate::content::{Section, SiteContent};
use crate::error::{Result, SiteError};
use folio_animation::{CARD_HOVER, FADE_IN_UP, ITEM_HOVER, STAGGER_CONTAINER, STAGGER_ITEM};
use folio_core::{ElementId, Insets, Rect};
use folio_reveal::{ObserverConfig, RevealEngine, RevealOptions};
use serde::Serialize;

pub const NAVBAR_HEIGHT: f32 = 80.0;
pub const HERO_MIN_HEIGHT: f32 = 800.0;
pub const SECTION_PADDING: f32 = 128.0;
pub const CONTAINER_MAX_WIDTH: f32 = 1152.0;

const GUTTER: f32 = 24.0;
const ROW_GAP: f32 = 16.0;
const HEADER_GAP: f32 = 64.0;

/// Header rows reveal with these delays, in order
const HEADER_DELAYS: [f32; 3] = [0.0, 0.1, 0.2];
const HERO_DELAYS: [f32; 5] = [0.0, 0.1, 0.2, 0.3, 0.4];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Navbar,
    Hero,
    About,
    Projects,
    Experience,
    Testimonials,
    Contact,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Navbar,
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Testimonials,
        SectionKind::Contact,
        SectionKind::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Navbar => "navbar",
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Projects => "projects",
            SectionKind::Experience => "experience",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Contact => "contact",
            SectionKind::Footer => "footer",
        }
    }
}

/// One mounted element of the page
#[derive(Clone, Debug, PartialEq)]
pub struct PageElement {
    pub id: ElementId,
    pub label: String,
    pub bounds: Rect,
    /// Whether a reveal was registered for it
    pub animated: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    pub kind: SectionKind,
    pub bounds: Rect,
    pub elements: Vec<PageElement>,
}

/// The mounted portfolio page
#[derive(Clone, Debug)]
pub struct Page {
    width: f32,
    height: f32,
    sections: Vec<SectionLayout>,
}

impl Page {
    /// Lay out `content` at `width` and register every reveal on `engine`
    pub fn mount(engine: &mut RevealEngine, content: &SiteContent, width: f32) -> Result<Page> {
        if !width.is_finite() || width <= 0.0 {
            return Err(SiteError::Width(width));
        }

        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        let mut top = 0.0;

        for kind in SectionKind::ALL {
            let builder = SectionBuilder::new(engine, kind, top, width);
            let layout = match kind {
                SectionKind::Navbar => navbar(builder),
                SectionKind::Hero => hero(builder, content),
                SectionKind::About => about(builder, content)?,
                SectionKind::Projects => {
                    let columns = if width >= 768.0 { 2 } else { 1 };
                    cards(builder, &content.projects, ("cards", 0.2, 0.1), columns, 420.0, CARD_HOVER)?
                }
                SectionKind::Experience => {
                    cards(builder, &content.experience, ("cards", 0.1, 0.15), 1, 220.0, CARD_HOVER)?
                }
                SectionKind::Testimonials => {
                    let columns = match width {
                        w if w >= 1024.0 => 3,
                        w if w >= 768.0 => 2,
                        _ => 1,
                    };
                    cards(builder, &content.testimonials, ("cards", 0.1, 0.1), columns, 200.0, ITEM_HOVER)?
                }
                SectionKind::Contact => contact(builder, content)?,
                SectionKind::Footer => footer(builder),
            };
            top = layout.bounds.bottom();
            sections.push(layout);
        }

        let page = Page {
            width,
            height: top,
            sections,
        };
        tracing::info!(
            "mounted page {}x{} with {} elements",
            page.width,
            page.height,
            page.elements().count()
        );
        Ok(page)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn elements(&self) -> impl Iterator<Item = &PageElement> {
        self.sections.iter().flat_map(|s| s.elements.iter())
    }

    /// Element mounted under `label`
    pub fn find(&self, label: &str) -> Option<ElementId> {
        self.elements().find(|e| e.label == label).map(|e| e.id)
    }

    /// Unmount every element of the page
    pub fn unmount(self, engine: &mut RevealEngine) {
        for element in self.elements() {
            engine.unmount(element.id);
        }
    }
}

struct SectionBuilder<'a> {
    engine: &'a mut RevealEngine,
    kind: SectionKind,
    page_width: f32,
    top: f32,
    left: f32,
    width: f32,
    cursor: f32,
    elements: Vec<PageElement>,
}

impl<'a> SectionBuilder<'a> {
    fn new(engine: &'a mut RevealEngine, kind: SectionKind, top: f32, page_width: f32) -> Self {
        let width = (page_width - 2.0 * GUTTER).clamp(0.0, CONTAINER_MAX_WIDTH);
        Self {
            engine,
            kind,
            page_width,
            top,
            left: (page_width - width) / 2.0,
            width,
            cursor: top,
            elements: Vec::new(),
        }
    }

    fn label(&self, part: &str) -> String {
        format!("{}.{}", self.kind.name(), part)
    }

    fn mount(&mut self, part: &str, bounds: Rect) -> ElementId {
        let label = self.label(part);
        let id = self.engine.mount_labeled(bounds, label.clone());
        self.elements.push(PageElement {
            id,
            label,
            bounds,
            animated: false,
        });
        id
    }

    fn register(&mut self, id: ElementId, variant: &str, options: RevealOptions) {
        self.engine.register_reveal(id, variant, options);
        let animated = self.engine.controller(id).is_some();
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            element.animated = animated;
        }
    }

    /// Full-width row at the cursor
    fn row(&mut self, part: &str, height: f32, variant: &str, options: RevealOptions) -> ElementId {
        let bounds = Rect::new(self.left, self.cursor, self.width, height);
        let id = self.mount(part, bounds);
        self.register(id, variant, options);
        self.cursor += height + ROW_GAP;
        id
    }

    fn header<T>(&mut self, section: &Section<T>) {
        let rows = [
            ("label", section.label.as_str(), 24.0),
            ("heading", section.heading.as_str(), 60.0),
            ("description", section.description.as_str(), 56.0),
        ];
        for ((part, text, height), delay) in rows.into_iter().zip(HEADER_DELAYS) {
            if text.is_empty() {
                continue;
            }
            let options = self.engine.default_options().delay(delay);
            self.row(part, height, FADE_IN_UP, options);
        }
        self.cursor += HEADER_GAP - ROW_GAP;
    }

    /// Stagger-revealed grid of `count` cards
    fn grid(
        &mut self,
        group: (&str, f32, f32),
        count: usize,
        columns: usize,
        item_height: f32,
        hover: &str,
    ) -> Result<()> {
        let (key, base, increment) = group;
        let group_key = self.label(key);
        self.engine.define_group(group_key.clone(), base, increment)?;

        let columns = columns.max(1);
        let item_width = (self.width - GUTTER * (columns - 1) as f32) / columns as f32;
        for i in 0..count {
            let (row, col) = (i / columns, i % columns);
            let bounds = Rect::new(
                self.left + col as f32 * (item_width + GUTTER),
                self.cursor + row as f32 * (item_height + GUTTER),
                item_width,
                item_height,
            );
            let id = self.mount(&format!("{key}.{i}"), bounds);
            let options = self.engine.default_options().group(group_key.clone());
            self.register(id, STAGGER_ITEM, options);
            self.engine.attach_hover(id, hover);
        }

        let rows = count.div_ceil(columns);
        self.cursor += rows as f32 * (item_height + GUTTER);
        Ok(())
    }

    /// Close the section; padded sections get a wrapper that fades in late
    fn finish(mut self, padded: bool) -> SectionLayout {
        let bottom = if padded {
            self.cursor + SECTION_PADDING
        } else {
            self.cursor
        };
        let bounds = Rect::new(0.0, self.top, self.page_width, bottom - self.top);

        if padded {
            let id = self.engine.mount_labeled(bounds, self.kind.name());
            self.elements.insert(
                0,
                PageElement {
                    id,
                    label: self.kind.name().to_string(),
                    bounds,
                    animated: false,
                },
            );
            let options = RevealOptions::new().observer(ObserverConfig::section());
            self.register(id, STAGGER_CONTAINER, options);
        }

        tracing::debug!(
            "{} laid out at y={} h={} ({} elements)",
            self.kind.name(),
            bounds.y(),
            bounds.height(),
            self.elements.len()
        );
        SectionLayout {
            kind: self.kind,
            bounds,
            elements: self.elements,
        }
    }

    fn pad_top(&mut self) {
        self.cursor += SECTION_PADDING;
    }
}

fn navbar(mut b: SectionBuilder<'_>) -> SectionLayout {
    let bounds = Rect::new(0.0, b.top, b.page_width, NAVBAR_HEIGHT);
    b.mount("bar", bounds);
    b.cursor += NAVBAR_HEIGHT;
    b.finish(false)
}

fn hero(mut b: SectionBuilder<'_>, content: &SiteContent) -> SectionLayout {
    let start = b.top;
    b.cursor += 48.0;

    let wide = b.page_width >= 1024.0;
    let column_width = if wide { (b.width - 48.0) / 2.0 } else { b.width };
    let full_width = b.width;
    b.width = column_width;

    let rows = [
        ("badge", 40.0),
        ("headline", 180.0),
        ("summary", 84.0),
        ("actions", 56.0),
        ("socials", 40.0),
    ];
    let text_top = b.cursor;
    for ((part, height), delay) in rows.into_iter().zip(HERO_DELAYS) {
        let options = RevealOptions::new().delay(delay).on_mount();
        b.row(part, height, FADE_IN_UP, options);
    }

    let portrait = if wide {
        Rect::new(b.left + column_width + 48.0, text_top, column_width, 480.0)
    } else {
        Rect::new(b.left, b.cursor, column_width, 360.0)
    };
    let id = b.mount("portrait", portrait);
    b.register(id, FADE_IN_UP, RevealOptions::new().delay(0.3).on_mount());
    b.cursor = b.cursor.max(portrait.bottom() + ROW_GAP);
    b.width = full_width;

    if !content.hero.skills.is_empty() {
        b.cursor += 80.0 - ROW_GAP;
        let options = b.engine.default_options();
        b.row("skills", 96.0, FADE_IN_UP, options);
    }

    // Pin the scroll hint to the bottom of a viewport-tall hero
    let bottom = (b.cursor + 80.0).max(start + HERO_MIN_HEIGHT);
    b.cursor = bottom - 64.0;
    let options = b
        .engine
        .default_options()
        .root_margin(Insets::ZERO)
        .delay(0.8);
    b.row("scroll_hint", 48.0, FADE_IN_UP, options);
    b.cursor = bottom;
    b.finish(false)
}

fn about(mut b: SectionBuilder<'_>, content: &SiteContent) -> Result<SectionLayout> {
    b.pad_top();
    let about = &content.about;
    let header = Section::<()> {
        label: "About Me".into(),
        heading: about.heading.clone(),
        description: about.paragraphs.join("\n\n"),
        items: Vec::new(),
    };
    b.header(&header);

    let columns = if b.page_width >= 768.0 { 2 } else { 1 };
    b.grid(("highlights", 0.1, 0.1), about.highlights.len(), columns, 160.0, ITEM_HOVER)?;
    Ok(b.finish(true))
}

fn cards<T>(
    mut b: SectionBuilder<'_>,
    section: &Section<T>,
    group: (&str, f32, f32),
    columns: usize,
    item_height: f32,
    hover: &str,
) -> Result<SectionLayout> {
    b.pad_top();
    b.header(section);
    b.grid(group, section.items.len(), columns, item_height, hover)?;

    if b.kind == SectionKind::Projects {
        let options = b.engine.default_options().delay(0.5);
        b.row("view_all", 56.0, FADE_IN_UP, options);
    }
    Ok(b.finish(true))
}

fn contact(mut b: SectionBuilder<'_>, content: &SiteContent) -> Result<SectionLayout> {
    b.pad_top();
    b.header(&content.contact);
    b.grid(("info", 0.1, 0.1), content.contact.items.len(), 1, 88.0, ITEM_HOVER)?;

    let options = b.engine.default_options().delay(0.3);
    b.row("form", 480.0, FADE_IN_UP, options);
    Ok(b.finish(true))
}

fn footer(mut b: SectionBuilder<'_>) -> SectionLayout {
    b.cursor += 48.0;
    let options = b.engine.default_options();
    b.row("content", 120.0, FADE_IN_UP, options);
    b.cursor += 48.0 - ROW_GAP;
    b.finish(false)
}
