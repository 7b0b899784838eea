//! Static font-metric tables for the Helvetica base-14 family.
//!
//! Widths come from the Adobe core-font AFM files and are in 1/1000 em.
//! The fonts are never embedded, so these tables are the only source of
//! measurement: whatever we measure here is what the viewer draws.
//!
//! Tables cover ASCII 0x20..=0x7E (95 printable characters), index =
//! `(char as usize) - 32`. A handful of WinAnsi punctuation marks common in
//! resumes (bullets, dashes, curly quotes) have explicit widths; everything
//! else falls back to `average_char_width`.

/// Unitless Helvetica line height: (ascender - descender + line gap) / 1000.
pub const LINE_HEIGHT_FACTOR: f32 = 1.156;

/// Distance from the top of a line box to the baseline, per point of font size.
pub const ASCENT_FACTOR: f32 = 0.718;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The three faces used on a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    /// PostScript name written into the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }

    /// Key under `/Resources /Font` used by `Tf` operators.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
pub struct FontMetricTable {
    pub font: Font,
    widths: &'static [u16; 95],
    /// Fallback width for characters without an explicit entry.
    pub average_char_width: u16,
    bold: bool,
}

impl FontMetricTable {
    /// Width of a single character in 1/1000 em.
    pub fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{a0}' => self.widths[0],
            '•' => 350,
            '–' | '€' => 556,
            '—' | '…' => 1000,
            '‘' | '’' => {
                if self.bold {
                    278
                } else {
                    222
                }
            }
            '“' | '”' => {
                if self.bold {
                    500
                } else {
                    333
                }
            }
            _ => self.average_char_width,
        }
    }

    /// Measures the rendered width of a string in points at `size`.
    pub fn measure_str(&self, s: &str, size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

/// Height of one line of text at `size`, gap included.
pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_FACTOR
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

static HELVETICA: FontMetricTable = FontMetricTable {
    font: Font::Regular,
    widths: &HELVETICA_WIDTHS,
    average_char_width: 556,
    bold: false,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    font: Font::Bold,
    widths: &HELVETICA_BOLD_WIDTHS,
    average_char_width: 611,
    bold: true,
};

/// Helvetica-Oblique is a slanted Helvetica; the advance widths are identical.
static HELVETICA_OBLIQUE: FontMetricTable = FontMetricTable {
    font: Font::Oblique,
    widths: &HELVETICA_WIDTHS,
    average_char_width: 556,
    bold: false,
};

/// Returns the static metric table for a face.
pub fn get_metrics(font: Font) -> &'static FontMetricTable {
    match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
        Font::Oblique => &HELVETICA_OBLIQUE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Encodes text for a `WinAnsiEncoding` simple font.
///
/// ASCII and Latin-1 map to themselves; the 0x80..=0x9F punctuation block is
/// mapped explicitly. Anything else becomes `?`.
pub fn encode_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
