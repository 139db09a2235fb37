//! CLI enum types.

use clap::ValueEnum;

use crate::art::StyleCode;

/// Display style for rendered art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Style {
    #[default]
    WhiteOnBlack,
    BlackOnWhite,
}

impl From<Style> for StyleCode {
    fn from(s: Style) -> Self {
        match s {
            Style::WhiteOnBlack => StyleCode::WhiteOnBlack,
            Style::BlackOnWhite => StyleCode::BlackOnWhite,
        }
    }
}
