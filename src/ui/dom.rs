//! DOM presenter (WASM only)
//!
//! Shows the mounted scene's section of `index.html` and fills it from the
//! view model. Decoration layers are patched node by node through their keys,
//! so items that stay on screen keep their CSS animation running.

use std::fmt::{Display, Write as _};

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use super::keyed::{Keyed, diff_by_key};
use super::view::{
    BurstGroupView, CardView, ConfettiView, FireworkView, FlipCardView, SceneView, StickerView,
};
use crate::error::{CardError, CardResult};
use crate::sim::SceneId;

/// Applies `CardView`s to the page
pub struct DomPresenter {
    document: Document,
    last: Option<CardView>,
}

impl DomPresenter {
    pub fn new() -> CardResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| CardError::platform("no document"))?;
        Ok(Self {
            document,
            last: None,
        })
    }

    fn element(&self, id: &str) -> CardResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| CardError::missing_element(id))
    }

    fn set_text(&self, id: &str, text: &str) -> CardResult<()> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_hidden(&self, id: &str, hidden: bool) -> CardResult<()> {
        let el = self.element(id)?;
        let classes = el.class_list();
        let result = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
        result.map_err(|_| CardError::platform(format!("class toggle on #{id}")))
    }

    /// Draw one frame. Unchanged frames are skipped.
    pub fn render(&mut self, view: CardView) {
        if self.last.as_ref() == Some(&view) {
            return;
        }
        if let Err(e) = self.apply(&view) {
            log::warn!("Render failed: {}", e);
        }
        self.last = Some(view);
    }

    fn apply(&self, view: &CardView) -> CardResult<()> {
        let last = self.last.as_ref().filter(|l| l.scene == view.scene);
        if last.is_none() {
            for scene in SceneId::ALL {
                self.set_hidden(scene.element_id(), scene != view.scene)?;
            }
        }
        let last = last.map(|l| &l.content);

        match &view.content {
            SceneView::Loading { title, progress } => {
                self.set_text("loading-title", title)?;
                let bar = self.element("loading-bar")?;
                bar.set_attribute("style", &format!("width: {progress}%"))
                    .map_err(|_| CardError::platform("progress bar style"))?;
            }
            SceneView::NameInput { draft, can_submit } => {
                let input: HtmlInputElement = self
                    .element("name-input")?
                    .dyn_into()
                    .map_err(|_| CardError::platform("#name-input is not an input"))?;
                if input.value() != *draft {
                    input.set_value(draft);
                }
                let button = self.element("name-submit")?;
                if *can_submit {
                    let _ = button.remove_attribute("disabled");
                } else {
                    let _ = button.set_attribute("disabled", "");
                }
            }
            SceneView::Envelope {
                opened,
                hint,
                headline,
                greeting,
                show_button,
            } => {
                let envelope = self.element("envelope")?;
                if *opened {
                    let _ = envelope.class_list().add_1("open");
                } else {
                    let _ = envelope.class_list().remove_1("open");
                }
                self.set_hidden("envelope-hint", hint.is_none())?;
                self.set_text("envelope-headline", headline.as_deref().unwrap_or(""))?;
                self.set_hidden("envelope-headline", headline.is_none())?;
                self.set_text("envelope-greeting", greeting.unwrap_or(""))?;
                self.set_hidden("envelope-greeting", greeting.is_none())?;
                self.set_hidden("envelope-continue", !show_button)?;
            }
            SceneView::Wish { line, fireworks } => {
                self.set_text("wish-line", line)?;
                let prev = match last {
                    Some(SceneView::Wish { fireworks, .. }) => Some(fireworks.as_slice()),
                    _ => None,
                };
                self.sync_layer("fireworks", prev, fireworks, firework_html)?;
            }
            SceneView::Sticker { stickers } => {
                let prev = match last {
                    Some(SceneView::Sticker { stickers }) => Some(stickers.as_slice()),
                    _ => None,
                };
                self.sync_layer("stickers", prev, stickers, sticker_html)?;
            }
            SceneView::FlipCards { cards } => {
                let prev = match last {
                    Some(SceneView::FlipCards { cards }) => Some(cards.as_slice()),
                    _ => None,
                };
                self.sync_layer("flip-cards", prev, cards, card_html)?;
            }
            SceneView::Final {
                prompt,
                hearts,
                farewell,
                bursts,
                confetti,
            } => {
                self.set_text("hug-prompt", prompt.as_deref().unwrap_or(""))?;
                self.set_hidden("hug-message", prompt.is_none())?;
                self.set_text("hug-hearts", &"💖".repeat(*hearts as usize))?;

                self.set_hidden("farewell", farewell.is_none())?;
                if let Some(farewell) = farewell {
                    self.set_text("farewell-title", &farewell.title)?;
                    self.set_text("farewell-line", farewell.line)?;
                    self.set_text("farewell-signature", farewell.signature)?;
                }

                let (prev_bursts, prev_confetti) = match last {
                    Some(SceneView::Final {
                        bursts, confetti, ..
                    }) => (Some(bursts.as_slice()), Some(confetti.as_slice())),
                    _ => (None, None),
                };
                self.sync_layer("bursts", prev_bursts, bursts, burst_group_html)?;
                self.sync_layer("confetti", prev_confetti, confetti, confetti_html)?;
            }
        }
        Ok(())
    }

    /// Bring a decoration layer from the previous frame to this one.
    ///
    /// Without a previous frame the layer is rebuilt; otherwise only the
    /// nodes whose key was added, removed or changed are touched.
    fn sync_layer<T: Keyed + PartialEq>(
        &self,
        id: &str,
        prev: Option<&[T]>,
        next: &[T],
        html: fn(&T) -> String,
    ) -> CardResult<()> {
        let layer = self.element(id)?;
        let Some(prev) = prev else {
            layer.set_inner_html(&next.iter().map(html).collect::<String>());
            return Ok(());
        };

        let diff = diff_by_key(prev, next);
        if diff.is_empty() {
            return Ok(());
        }
        for key in &diff.removed {
            if let Some(node) = keyed_child(&layer, key)? {
                node.remove();
            }
        }
        for &i in &diff.changed {
            if let Some(node) = keyed_child(&layer, &next[i].key())? {
                node.set_outer_html(&html(&next[i]));
            }
        }
        if !diff.added.is_empty() {
            let fresh: String = diff.added.iter().map(|&i| html(&next[i])).collect();
            layer
                .insert_adjacent_html("beforeend", &fresh)
                .map_err(|_| CardError::platform(format!("append to #{id}")))?;
        }
        log::trace!(
            "#{}: +{} -{} ~{}",
            id,
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len()
        );
        Ok(())
    }
}

fn keyed_child(layer: &Element, key: &impl Display) -> CardResult<Option<Element>> {
    layer
        .query_selector(&format!(r#":scope > [data-key="{key}"]"#))
        .map_err(|_| CardError::platform(format!("bad layer key {key}")))
}

fn firework_html(fw: &FireworkView) -> String {
    format!(
        r#"<div class="firework {}" data-key="{}" style="left:{:.1}%;top:{:.1}%"></div>"#,
        fw.class, fw.id, fw.left_pct, fw.top_pct
    )
}

fn sticker_html(s: &StickerView) -> String {
    format!(
        concat!(
            r#"<button class="sticker {}" data-key="{i}" data-index="{i}" "#,
            r#"style="left:{:.1}%;top:{:.1}%;transform:rotate({:.0}deg) scale({:.2})">{}</button>"#
        ),
        s.animation.unwrap_or(""),
        s.left_pct,
        s.top_pct,
        s.rotation_deg,
        s.scale,
        s.glyph,
        i = s.index,
    )
}

fn card_html(card: &FlipCardView) -> String {
    format!(
        concat!(
            r#"<button class="flip-card{}" data-key="{i}" data-index="{i}">"#,
            r#"<span class="front">{}</span><span class="back">{}</span></button>"#
        ),
        if card.face_up { " flipped" } else { "" },
        card.front,
        card.back,
        i = card.index,
    )
}

fn burst_group_html(group: &BurstGroupView) -> String {
    let mut html = format!(r#"<div class="burst-group" data-key="{}">"#, group.id);
    for b in &group.items {
        let _ = write!(
            html,
            concat!(
                r#"<span class="burst" "#,
                r#"style="left:{:.1}%;top:{:.1}%;--dx:{:.0}px;--dy:{:.0}px">{}</span>"#
            ),
            b.left_pct, b.top_pct, b.dx, b.dy, b.glyph
        );
    }
    html.push_str("</div>");
    html
}

fn confetti_html(c: &ConfettiView) -> String {
    format!(
        concat!(
            r#"<span class="confetti" data-key="{}" style="left:{:.1}%;width:{:.0}px;"#,
            r#"height:{:.0}px;background:{};--rot:{:.0}deg;--drift:{:.0}px;"#,
            r#"animation-delay:{:.2}s;animation-duration:{:.2}s"></span>"#
        ),
        c.index,
        c.left_pct,
        c.width_px,
        c.width_px * 0.6,
        c.color,
        c.rotation_deg,
        c.drift_px,
        c.delay_s,
        c.duration_s
    )
}
