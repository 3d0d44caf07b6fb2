use super::hand::HandKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgra([u8; 4]);

impl Bgra {
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self([blue, green, red, alpha])
    }

    pub const fn b(&self) -> u8 {
        self.0[0]
    }

    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    pub const fn r(&self) -> u8 {
        self.0[2]
    }

    pub const fn a(&self) -> u8 {
        self.0[3]
    }
}

impl AsRef<[u8]> for Bgra {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Bgra,
    pub frame: Bgra,
    pub primary: Bgra,
    pub secondary: Bgra,
    pub highlight: Bgra,
}

impl Theme {
    pub fn default() -> Self {
        Self {
            background: Bgra::from_rgba(30, 30, 46, 210),   // Base
            frame: Bgra::from_rgba(49, 50, 68, 210),        // Surface0
            primary: Bgra::from_rgba(203, 166, 247, 255),   // Mauve
            secondary: Bgra::from_rgba(180, 190, 254, 255), // Lavender
            highlight: Bgra::from_rgba(243, 139, 168, 255), // Red
        }
    }

    pub fn hand(&self, kind: HandKind) -> Bgra {
        match kind {
            HandKind::Second => self.highlight,
            HandKind::Minute => self.secondary,
            HandKind::Hour => self.primary,
        }
    }
}
