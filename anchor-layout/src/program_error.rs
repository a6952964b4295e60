//! Custom program error tables.

use core::fmt;

/// First code of a program's custom error range.
pub const CUSTOM_ERROR_START: u32 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramErrorEntry {
    pub code: u32,
    pub name: &'static str,
    pub msg: &'static str,
}

impl ProgramErrorEntry {
    pub const fn new(code: u32, name: &'static str, msg: &'static str) -> Self {
        Self { code, name, msg }
    }
}

impl fmt::Display for ProgramErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.code, self.msg)
    }
}

/// Code to error mapping for one program.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTable {
    pub program: &'static str,
    pub entries: &'static [ProgramErrorEntry],
}

impl ErrorTable {
    pub const fn new(program: &'static str, entries: &'static [ProgramErrorEntry]) -> Self {
        Self { program, entries }
    }

    pub fn lookup(&self, code: u32) -> Option<&'static ProgramErrorEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn by_name(&self, name: &str) -> Option<&'static ProgramErrorEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Resolve the custom error code in a runtime log line such as
    /// `Program X failed: custom program error: 0x1772`.
    pub fn from_log(&self, line: &str) -> Option<&'static ProgramErrorEntry> {
        parse_custom_error(line).and_then(|code| self.lookup(code))
    }
}

/// Extract the code from `custom program error: 0x<hex>`.
pub fn parse_custom_error(line: &str) -> Option<u32> {
    const MARKER: &str = "custom program error: 0x";
    let start = line.find(MARKER)? + MARKER.len();
    let digits: &str = {
        let rest = &line[start..];
        let end = rest
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    u32::from_str_radix(digits, 16).ok()
}
