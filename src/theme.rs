use colored::{Color, ColoredString, Colorize};

use crate::error::Result;
use crate::models::Theme;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;

type Listener = Box<dyn FnMut(Theme)>;

/// The active theme, handed to whoever renders output. Changing it saves the
/// new value and then tells every subscriber.
pub struct ThemeContext {
    theme: Theme,
    listeners: Vec<Listener>,
}

impl ThemeContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            listeners: Vec::new(),
        }
    }

    pub fn load<S: KeyValueStore>(store: &RecordStore<S>) -> Result<Self> {
        Ok(Self::new(store.get_theme()?))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn set<S: KeyValueStore>(&mut self, store: &mut RecordStore<S>, theme: Theme) -> Result<()> {
        store.save_theme(theme)?;
        self.theme = theme;
        for listener in &mut self.listeners {
            listener(theme);
        }
        Ok(())
    }

    pub fn toggle<S: KeyValueStore>(&mut self, store: &mut RecordStore<S>) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(store, next)?;
        Ok(next)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }
}

/// Terminal colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Color::BrightYellow,
                positive: Color::BrightGreen,
                negative: Color::BrightRed,
                muted: Color::BrightBlack,
            },
            Theme::Light => Self {
                accent: Color::Blue,
                positive: Color::Green,
                negative: Color::Red,
                muted: Color::Black,
            },
        }
    }

    pub fn heading(&self, text: &str) -> ColoredString {
        text.color(self.accent).bold()
    }

    /// Green when the amount is zero or more, red below zero.
    pub fn signed(&self, amount: f64, text: &str) -> ColoredString {
        if amount < 0.0 {
            text.color(self.negative)
        } else {
            text.color(self.positive)
        }
    }

    pub fn dim(&self, text: &str) -> ColoredString {
        text.color(self.muted)
    }

    /// A fixed-width bar for a 0..=1 ratio.
    pub fn progress_bar(&self, ratio: f64, width: usize) -> String {
        let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
        format!(
            "{}{}",
            "\u{2588}".repeat(filled).as_str().color(self.positive),
            "\u{2591}".repeat(width - filled).as_str().color(self.muted)
        )
    }
}
