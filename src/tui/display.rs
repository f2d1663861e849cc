//! Terminal display backend.

use crate::display::{Display, FrameBuffer, DISPLAY_HEIGHT};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{TerminalOptions, Viewport};
use std::io;

/// Renders the framebuffer as a bordered block of `█` cells.
///
/// Uses an inline viewport rather than the alternate screen, so status
/// lines printed around the run coexist with the picture and the last
/// frame stays visible after exit.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    frame: FrameBuffer,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                // pixel rows plus the border
                viewport: Viewport::Inline(DISPLAY_HEIGHT as u16 + 2),
            },
        )?;
        Ok(Self {
            terminal,
            frame: FrameBuffer::new(),
        })
    }
}

impl Display for TerminalDisplay {
    fn init(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn draw_sprite(&mut self, memory: &[u8], i: u16, x: u8, y: u8, n: u8) -> bool {
        self.frame.xor_sprite(memory, i, x, y, n)
    }

    fn render(&mut self) -> io::Result<()> {
        let lines: Vec<Line> = self
            .frame
            .rows()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|&p| if p == 1 { '█' } else { ' ' })
                        .collect::<String>(),
                )
            })
            .collect();

        self.terminal.draw(move |frame| {
            let widget = Paragraph::new(lines)
                .block(Block::default().title(" CHIP-8 ").borders(Borders::ALL));
            frame.render_widget(widget, frame.area());
        })?;
        Ok(())
    }
}
