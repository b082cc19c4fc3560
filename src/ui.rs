use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use lapwatch_core::{controls, format_elapsed, lap_rows, Button, Control, Stopwatch};

const MAX_WIDTH: usize = 44;
const MARGIN: usize = 2;
const LIST_TOP: usize = 6;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tone {
    Title,
    Clock,
    Go,
    Halt,
    Neutral,
    Disabled,
    Lap,
    Fastest,
    Slowest,
    Footer,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }
}

pub type Line = Vec<Span>;

fn content_width(width: u16) -> usize {
    (width as usize).saturating_sub(MARGIN * 2).clamp(20, MAX_WIDTH)
}

/// Left and right text with the gap filled so the row spans `width`.
fn spread(left: Span, right: Span, width: usize) -> Line {
    let used = left.text.chars().count() + right.text.chars().count();
    let gap = width.saturating_sub(used).max(1);
    vec![
        Span::new(" ".repeat(MARGIN), Tone::Lap),
        left,
        Span::new(" ".repeat(gap), Tone::Lap),
        right,
    ]
}

fn button_span(button: &Button) -> Span {
    let tone = match button.control {
        None => Tone::Disabled,
        Some(Control::Start | Control::Resume) => Tone::Go,
        Some(Control::Stop) => Tone::Halt,
        Some(_) => Tone::Neutral,
    };
    Span::new(format!("( {} )", button.label), tone)
}

/// Lines of the stopwatch screen, top to bottom, for a `width` x `height`
/// terminal. Laps are listed newest first starting `scroll` rows down.
pub fn stopwatch_lines(
    stopwatch: &Stopwatch,
    scroll: usize,
    width: u16,
    height: u16,
) -> Vec<Line> {
    let inner = content_width(width);
    let height = height as usize;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(vec![
        Span::new(" ".repeat(MARGIN), Tone::Title),
        Span::new("STOPWATCH", Tone::Title),
    ]);
    lines.push(Vec::new());

    let clock = format_elapsed(stopwatch.elapsed_ms());
    let pad = MARGIN + inner.saturating_sub(clock.len()) / 2;
    lines.push(vec![Span::new(" ".repeat(pad), Tone::Clock), Span::new(clock, Tone::Clock)]);
    lines.push(Vec::new());

    let [left, right] = controls(stopwatch.phase());
    lines.push(spread(button_span(&left), button_span(&right), inner));
    lines.push(Vec::new());

    // Footer takes the last row.
    let visible = height.saturating_sub(LIST_TOP + 1);
    for row in lap_rows(stopwatch).into_iter().skip(scroll).take(visible) {
        let tone = if row.mark.fastest {
            Tone::Fastest
        } else if row.mark.slowest {
            Tone::Slowest
        } else {
            Tone::Lap
        };
        lines.push(spread(
            Span::new(format!("Lap {}", row.number), tone),
            Span::new(format_elapsed(row.duration_ms), tone),
            inner,
        ));
    }

    if height > lines.len() {
        lines.resize(height - 1, Vec::new());
        lines.push(vec![Span::new(
            format!("{}space=start/stop  l=lap  r=reset  ?=help  q=quit", " ".repeat(MARGIN)),
            Tone::Footer,
        )]);
    }
    lines.truncate(height);
    lines
}

pub fn help_lines() -> Vec<Line> {
    const HELP: &str = "STOPWATCH HELP\n\n\
                        Space  Start/Stop/Resume\n\
                        Enter  Start/Stop/Resume\n\
                        Right  Right button\n\
                        Left   Left button\n\
                        l      Record lap\n\
                        r      Reset (stopped)\n\
                        Up/Dn  Scroll laps\n\
                        q      Quit\n\n\
                        Press any key to close";
    HELP.lines()
        .enumerate()
        .map(|(i, text)| {
            let tone = if i == 0 { Tone::Title } else { Tone::Lap };
            vec![Span::new(format!("{}{}", " ".repeat(MARGIN), text), tone)]
        })
        .collect()
}

fn color(tone: Tone) -> Color {
    match tone {
        Tone::Title | Tone::Clock | Tone::Neutral | Tone::Lap => Color::White,
        Tone::Go => Color::Rgb { r: 0x00, g: 0xe6, b: 0x76 },
        Tone::Halt => Color::Rgb { r: 0xd5, g: 0x00, b: 0x00 },
        Tone::Disabled => Color::DarkGrey,
        Tone::Fastest => Color::Rgb { r: 0x00, g: 0xe6, b: 0x76 },
        Tone::Slowest => Color::Rgb { r: 0xf4, g: 0x43, b: 0x36 },
        Tone::Footer => Color::Grey,
    }
}

pub fn draw<W: Write>(out: &mut W, lines: &[Line]) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (y, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        for span in line {
            let bold = matches!(span.tone, Tone::Title | Tone::Clock);
            if bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, SetForegroundColor(color(span.tone)), Print(&span.text))?;
            if bold {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}
