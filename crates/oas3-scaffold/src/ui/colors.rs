use std::io::IsTerminal;

use clap::builder::styling::{Color as ClapColor, RgbColor, Style, Styles};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

type Rgb = (u8, u8, u8);

/// One RGB triple per role the CLI prints.
struct Palette {
  timestamp: Rgb,
  primary: Rgb,
  accent: Rgb,
  info: Rgb,
  success: Rgb,
  warning: Rgb,
  label: Rgb,
  value: Rgb,
}

const DARK: Palette = Palette {
  timestamp: (118, 166, 166),
  primary: (191, 126, 4),
  accent: (166, 84, 55),
  info: (118, 166, 166),
  success: (120, 180, 120),
  warning: (230, 170, 60),
  label: (217, 164, 4),
  value: (242, 211, 56),
};

const LIGHT: Palette = Palette {
  timestamp: (92, 62, 38),
  primary: (70, 42, 25),
  accent: (211, 99, 70),
  info: (40, 111, 170),
  success: (34, 142, 90),
  warning: (176, 110, 20),
  label: (176, 103, 66),
  value: (199, 146, 76),
};

impl Theme {
  const fn palette(self) -> &'static Palette {
    match self {
      Self::Dark => &DARK,
      Self::Light => &LIGHT,
    }
  }
}

/// Terminal colors for the current run. With colors disabled every role
/// resolves to [`Color::Reset`].
pub struct Colors {
  enabled: bool,
  palette: &'static Palette,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self {
      enabled,
      palette: theme.palette(),
    }
  }

  const fn pick(&self, (r, g, b): Rgb) -> Color {
    if self.enabled { Color::Rgb { r, g, b } } else { Color::Reset }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(self.palette.timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(self.palette.primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(self.palette.accent)
  }

  pub const fn info(&self) -> Color {
    self.pick(self.palette.info)
  }

  pub const fn success(&self) -> Color {
    self.pick(self.palette.success)
  }

  pub const fn warning(&self) -> Color {
    self.pick(self.palette.warning)
  }

  pub const fn label(&self) -> Color {
    self.pick(self.palette.label)
  }

  pub const fn value(&self) -> Color {
    self.pick(self.palette.value)
  }

  pub const fn clap_styles() -> Styles {
    const fn fg((r, g, b): Rgb) -> Option<ClapColor> {
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(fg(DARK.label)))
      .usage(Style::new().bold().fg_color(fg(DARK.label)))
      .literal(Style::new().fg_color(fg(DARK.success)))
      .placeholder(Style::new().fg_color(fg(DARK.info)))
      .error(Style::new().bold().fg_color(fg(DARK.accent)))
      .valid(Style::new().fg_color(fg(DARK.success)))
      .invalid(Style::new().bold().fg_color(fg(DARK.accent)))
  }
}

/// Converts a palette color for use in a `comfy-table` cell.
pub fn table_color(color: Color) -> ComfyColor {
  match color {
    Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
    Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
    _ => ComfyColor::Reset,
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background indexes 8
/// and up are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}
