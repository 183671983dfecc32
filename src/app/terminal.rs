use anyhow::Result;
use crossterm::{ExecutableCommand, cursor, style, terminal};
use std::io::{self, Stdout};

/// Owns the terminal while the tutor runs: raw mode, alternate screen and a
/// hidden cursor.
pub struct TerminalContext {
    pub width: usize,
    pub height: usize,
    pub stdout: Stdout,
}

impl TerminalContext {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout
            .execute(terminal::EnterAlternateScreen)?
            .execute(terminal::SetTitle("vitutor"))?
            .execute(cursor::Hide)?
            .execute(terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            width: width as usize,
            height: height as usize,
            stdout,
        })
    }

    /// The next frame is drawn in full, so whatever the old size left on
    /// screen goes away here.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        (self.width, self.height) = (width, height);
        self.stdout
            .execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    pub fn cleanup(mut self) -> Result<()> {
        restore(&mut self.stdout)
    }
}

/// Leaves raw mode and the alternate screen. Also used by the panic hook,
/// which has no `TerminalContext` at hand.
pub fn restore(stdout: &mut Stdout) -> Result<()> {
    stdout
        .execute(style::ResetColor)?
        .execute(terminal::Clear(terminal::ClearType::All))?
        .execute(cursor::Show)?
        .execute(terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
