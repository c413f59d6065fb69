//! Toast notifications
//!
//! Short-lived messages painted over the whole UI, used for non-fatal,
//! user-recoverable situations ("Download failed: no rows selected").

use std::time::{Duration, Instant};

use egui::{Align2, Area, Color32, Context, Frame, Id, RichText, Stroke};

use crate::theme;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn color(&self) -> Color32 {
        match self {
            ToastKind::Info => theme::accent_color(),
            ToastKind::Success => theme::success_color(),
            ToastKind::Warning => theme::warning_color(),
            ToastKind::Error => theme::error_color(),
        }
    }
}

struct Toast {
    kind: ToastKind,
    message: String,
    created: Instant,
}

/// Queue of active toasts. Push from anywhere, show once per frame.
#[derive(Default)]
pub struct Toasts {
    toasts: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?kind, %message, "toast");
        self.toasts.push(Toast {
            kind,
            message,
            created: Instant::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Paint active toasts and drop expired ones.
    pub fn show(&mut self, ctx: &Context) {
        let now = Instant::now();
        self.toasts.retain(|t| now.duration_since(t.created) < TOAST_TTL);
        if self.toasts.is_empty() {
            return;
        }

        Area::new(Id::new("talentdesk_toasts"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let color = toast.kind.color();
                    Frame::popup(ui.style())
                        .stroke(Stroke::new(1.0, color))
                        .show(ui, |ui| {
                            ui.label(RichText::new(&toast.message).color(color));
                        });
                    ui.add_space(4.0);
                }
            });

        // Keep repainting while toasts are fading out.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
