//! The built-in dark palette. Non-color tokens are shared with the light theme.

use crate::theming::tokens::ColorRole;

pub const NAME: &str = "Default Dark";
pub const DESCRIPTION: &str = "Low-glare dark palette";

pub fn color(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Primary => "#60a5fa",
        ColorRole::PrimaryHover => "#3b82f6",
        ColorRole::Secondary => "#94a3b8",
        ColorRole::SecondaryHover => "#cbd5e1",
        ColorRole::Accent => "#a78bfa",
        ColorRole::Background => "#0f172a",
        ColorRole::Surface => "#1e293b",
        ColorRole::SurfaceHover => "#334155",
        ColorRole::Text => "#f1f5f9",
        ColorRole::TextSecondary => "#cbd5e1",
        ColorRole::TextMuted => "#64748b",
        ColorRole::Border => "#334155",
        ColorRole::BorderLight => "#1e293b",
        ColorRole::Success => "#4ade80",
        ColorRole::Warning => "#fbbf24",
        ColorRole::Error => "#f87171",
        ColorRole::Info => "#38bdf8",
        ColorRole::HeaderBackground => "#1e293b",
        ColorRole::HeaderText => "#f1f5f9",
        ColorRole::SidebarBackground => "#020617",
        ColorRole::SidebarText => "#cbd5e1",
        ColorRole::SidebarHover => "#1e293b",
        ColorRole::SidebarActive => "#60a5fa",
        ColorRole::BoardBackground => "#0f172a",
        ColorRole::ColumnBackground => "#1e293b",
        ColorRole::ColumnHeader => "#e2e8f0",
        ColorRole::ColumnBorder => "#334155",
        ColorRole::CardBackground => "#334155",
        ColorRole::CardBorder => "#475569",
        ColorRole::CardHover => "#475569",
        ColorRole::CardText => "#f1f5f9",
        ColorRole::ButtonPrimary => "#3b82f6",
        ColorRole::ButtonPrimaryText => "#ffffff",
        ColorRole::ButtonSecondary => "#334155",
        ColorRole::ButtonSecondaryText => "#f1f5f9",
        ColorRole::ButtonDanger => "#dc2626",
        ColorRole::ButtonDangerText => "#ffffff",
        ColorRole::InputBackground => "#1e293b",
        ColorRole::InputBorder => "#475569",
        ColorRole::InputFocus => "#60a5fa",
        ColorRole::InputText => "#f1f5f9",
        ColorRole::ModalBackground => "#1e293b",
        ColorRole::ModalOverlay => "rgba(2, 6, 23, 0.7)",
    }
}
