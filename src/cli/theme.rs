use crate::cli::{open_store, ThemeCommands};
use crate::error::Result;
use crate::theme::ThemeContext;

pub fn run(command: Option<ThemeCommands>) -> Result<()> {
    let mut store = open_store()?;
    let mut ctx = ThemeContext::load(&store)?;
    ctx.subscribe(|theme| {
        let palette = crate::theme::Palette::for_theme(theme);
        println!("Theme set to {}", palette.heading(theme.as_str()));
    });

    match command.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => {
            println!("Theme: {}", ctx.palette().heading(ctx.theme().as_str()));
        }
        ThemeCommands::Set { theme } => ctx.set(&mut store, theme)?,
        ThemeCommands::Toggle => {
            ctx.toggle(&mut store)?;
        }
    }
    Ok(())
}
