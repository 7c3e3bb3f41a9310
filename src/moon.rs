//! Crescent moon rendering driven by a progress fraction.
//!
//! The progress fraction is the share of time remaining. A progress of `0.0`
//! (nothing counting, or a countdown that has run out) draws a full moon;
//! at `1.0`, the start of a countdown, the moon is dark, and it fills from the
//! left limb as time elapses. The lit region of each row lies between the left
//! edge of the disk and a terminator at `(1 - 2f) * w`, where `w` is the
//! half-width of the disk on that row, so the lit share is `1 - f`.
//!
//! Two renderings are provided: [`crescent_path`] produces an SVG path for
//! hosts that draw vector graphics, and [`Model`] draws the moon in terminal
//! cells using lipgloss styles.
//!
//! ```rust
//! use bubbletea_moontimer::moon::{new, Cell};
//!
//! let moon = new(&[]);
//! let full = moon.cells(0.0);
//! assert!(full.iter().flatten().all(|c| *c != Cell::Dark));
//!
//! let new_moon = moon.cells(1.0);
//! assert!(new_moon.iter().flatten().all(|c| *c != Cell::Lit));
//! ```

use lipgloss_extras::lipgloss::{Color, Style};

const DEFAULT_RADIUS: usize = 6;
const DEFAULT_LIT_COLOR: &str = "#FFFFFF";
const DEFAULT_DARK_COLOR: &str = "#333333";

/// Center x of the moon in the SVG coordinate space.
pub const SVG_CENTER_X: f64 = 130.0;
/// Center y of the moon in the SVG coordinate space.
pub const SVG_CENTER_Y: f64 = 130.0;
/// Moon radius in the SVG coordinate space.
pub const SVG_RADIUS: f64 = 60.0;

/// Builds the SVG path of the lit part of the moon.
///
/// The path traces the left limb from top to bottom, then returns to the top
/// along an elliptical arc of horizontal radius `rx`. Up to half progress the
/// return arc runs along the right side, lighting the left half plus a
/// gibbous bulge that narrows as progress grows; past half it runs along the
/// left side and carves the left half down to a thin crescent.
///
/// ```rust
/// use bubbletea_moontimer::moon::crescent_path;
///
/// assert_eq!(
///     crescent_path(0.0, 130.0, 130.0, 60.0),
///     "M 130 70 A 60 60 0 1 0 130 190 A 60 60 0 0 0 130 70"
/// );
/// ```
pub fn crescent_path(progress: f64, cx: f64, cy: f64, r: f64) -> String {
    let percent = progress.clamp(0.0, 1.0) * 100.0;
    let (rx, sweep) = if percent > 50.0 {
        ((percent - 50.0) * 2.0 / 100.0 * r, 1)
    } else {
        (r - percent * 2.0 / 100.0 * r, 0)
    };
    let top = cy - r;
    let bottom = cy + r;
    format!(
        "M {cx} {top} A {r} {r} 0 1 0 {cx} {bottom} A {rx} {r} 0 0 {sweep} {cx} {top}"
    )
}

/// What a single terminal cell of the moon shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Inside the disk and lit.
    Lit,
    /// Inside the disk, in shadow.
    Dark,
    /// Outside the disk.
    Sky,
}

/// Options for configuring the moon at construction.
#[derive(Debug, Clone)]
pub enum MoonOption {
    /// Radius in terminal rows.
    WithRadius(usize),
    /// Foreground color of lit cells.
    WithLitColor(String),
    /// Foreground color of shadowed cells.
    WithDarkColor(String),
    /// Characters for lit and shadowed cells.
    WithFillCharacters(char, char),
}

impl MoonOption {
    pub(crate) fn apply(&self, m: &mut Model) {
        match self {
            MoonOption::WithRadius(radius) => m.radius = (*radius).max(1),
            MoonOption::WithLitColor(color) => m.lit_color = color.clone(),
            MoonOption::WithDarkColor(color) => m.dark_color = color.clone(),
            MoonOption::WithFillCharacters(lit, dark) => {
                m.lit = *lit;
                m.dark = *dark;
            }
        }
    }
}

/// Sets the radius in terminal rows. Zero is raised to one.
pub fn with_radius(radius: usize) -> MoonOption {
    MoonOption::WithRadius(radius)
}

/// Sets the color of lit cells.
pub fn with_lit_color(color: impl Into<String>) -> MoonOption {
    MoonOption::WithLitColor(color.into())
}

/// Sets the color of shadowed cells.
pub fn with_dark_color(color: impl Into<String>) -> MoonOption {
    MoonOption::WithDarkColor(color.into())
}

/// Sets the characters for lit and shadowed cells.
pub fn with_fill_characters(lit: char, dark: char) -> MoonOption {
    MoonOption::WithFillCharacters(lit, dark)
}

/// Terminal moon renderer.
#[derive(Debug, Clone)]
pub struct Model {
    /// Radius in rows. The moon is drawn `2 * radius` rows tall and
    /// `4 * radius` columns wide, as terminal cells are about twice as tall
    /// as they are wide.
    pub radius: usize,
    /// Character drawn for lit cells.
    pub lit: char,
    /// Character drawn for shadowed cells.
    pub dark: char,
    /// Foreground color of lit cells.
    pub lit_color: String,
    /// Foreground color of shadowed cells.
    pub dark_color: String,
}

/// Creates a moon renderer with the given options applied in order.
pub fn new(opts: &[MoonOption]) -> Model {
    let mut m = Model {
        radius: DEFAULT_RADIUS,
        lit: '█',
        dark: '░',
        lit_color: DEFAULT_LIT_COLOR.to_string(),
        dark_color: DEFAULT_DARK_COLOR.to_string(),
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl Model {
    /// Width of the rendered moon in columns.
    pub fn width(&self) -> usize {
        self.radius * 4
    }

    /// Height of the rendered moon in rows.
    pub fn height(&self) -> usize {
        self.radius * 2
    }

    /// Classifies every cell of the moon for the given progress.
    pub fn cells(&self, progress: f64) -> Vec<Vec<Cell>> {
        let f = progress.clamp(0.0, 1.0);
        let r = self.radius as f64;
        let k = 1.0 - 2.0 * f;

        (0..self.height())
            .map(|row| {
                let y = row as f64 + 0.5 - r;
                let w = (r * r - y * y).max(0.0).sqrt();
                (0..self.width())
                    .map(|col| {
                        let x = (col as f64 + 0.5) / 2.0 - r;
                        if x.abs() > w {
                            Cell::Sky
                        } else if f < 1.0 && x <= k * w {
                            Cell::Lit
                        } else {
                            Cell::Dark
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Renders the moon for the given progress without styling.
    pub fn view_plain(&self, progress: f64) -> String {
        self.render(progress, |cell| match cell {
            Cell::Lit => self.lit.to_string(),
            Cell::Dark => self.dark.to_string(),
            Cell::Sky => " ".to_string(),
        })
    }

    /// Renders the moon for the given progress with lipgloss colors.
    pub fn view_as(&self, progress: f64) -> String {
        let lit = Style::new()
            .foreground(Color::from(self.lit_color.as_str()))
            .render(&self.lit.to_string());
        let dark = Style::new()
            .foreground(Color::from(self.dark_color.as_str()))
            .render(&self.dark.to_string());

        self.render(progress, |cell| match cell {
            Cell::Lit => lit.clone(),
            Cell::Dark => dark.clone(),
            Cell::Sky => " ".to_string(),
        })
    }

    fn render(&self, progress: f64, paint: impl Fn(Cell) -> String) -> String {
        self.cells(progress)
            .into_iter()
            .map(|row| row.into_iter().map(&paint).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
