//! The built-in light palette.
//!
//! Also serves as the structural default: every draft and import is
//! completed against these values.

use crate::theming::tokens::ColorRole;

pub const NAME: &str = "Default Light";
pub const DESCRIPTION: &str = "Clean light palette for everyday boards";

pub fn color(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Primary => "#3b82f6",
        ColorRole::PrimaryHover => "#2563eb",
        ColorRole::Secondary => "#64748b",
        ColorRole::SecondaryHover => "#475569",
        ColorRole::Accent => "#8b5cf6",
        ColorRole::Background => "#f8fafc",
        ColorRole::Surface => "#ffffff",
        ColorRole::SurfaceHover => "#f1f5f9",
        ColorRole::Text => "#0f172a",
        ColorRole::TextSecondary => "#475569",
        ColorRole::TextMuted => "#94a3b8",
        ColorRole::Border => "#e2e8f0",
        ColorRole::BorderLight => "#f1f5f9",
        ColorRole::Success => "#22c55e",
        ColorRole::Warning => "#f59e0b",
        ColorRole::Error => "#ef4444",
        ColorRole::Info => "#0ea5e9",
        ColorRole::HeaderBackground => "#ffffff",
        ColorRole::HeaderText => "#0f172a",
        ColorRole::SidebarBackground => "#1e293b",
        ColorRole::SidebarText => "#e2e8f0",
        ColorRole::SidebarHover => "#334155",
        ColorRole::SidebarActive => "#3b82f6",
        ColorRole::BoardBackground => "#f1f5f9",
        ColorRole::ColumnBackground => "#e2e8f0",
        ColorRole::ColumnHeader => "#334155",
        ColorRole::ColumnBorder => "#cbd5e1",
        ColorRole::CardBackground => "#ffffff",
        ColorRole::CardBorder => "#e2e8f0",
        ColorRole::CardHover => "#f8fafc",
        ColorRole::CardText => "#1e293b",
        ColorRole::ButtonPrimary => "#3b82f6",
        ColorRole::ButtonPrimaryText => "#ffffff",
        ColorRole::ButtonSecondary => "#e2e8f0",
        ColorRole::ButtonSecondaryText => "#1e293b",
        ColorRole::ButtonDanger => "#ef4444",
        ColorRole::ButtonDangerText => "#ffffff",
        ColorRole::InputBackground => "#ffffff",
        ColorRole::InputBorder => "#cbd5e1",
        ColorRole::InputFocus => "#3b82f6",
        ColorRole::InputText => "#0f172a",
        ColorRole::ModalBackground => "#ffffff",
        ColorRole::ModalOverlay => "rgba(15, 23, 42, 0.5)",
    }
}
