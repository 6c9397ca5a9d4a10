//! Input masks for text widgets.
//!
//! An input mask constrains user input to a fixed pattern such as an IP
//! address or an ISO date. Literal separators are inserted automatically and
//! empty positions are shown with a blank character.
//!
//! # Mask Characters
//!
//! | Char | Meaning |
//! |------|---------|
//! | `A` / `a` | Letter, required / optional |
//! | `N` / `n` | Alphanumeric, required / optional |
//! | `X` / `x` | Any non-blank character, required / optional |
//! | `9` / `0` | Digit, required / optional |
//! | `D` / `d` | Digit 1-9, required / optional |
//! | `#` | Digit or sign, optional |
//! | `H` / `h` | Hex digit, required / optional |
//! | `B` / `b` | Binary digit, required / optional |
//!
//! # Meta Characters
//!
//! | Char | Meaning |
//! |------|---------|
//! | `>`  | Uppercase following letters |
//! | `<`  | Lowercase following letters |
//! | `!`  | Switch case conversion off |
//! | `\`  | Use the next character as a literal |
//! | `;c` | End of mask; `c` becomes the blank character (default space) |
//!
//! # Example
//!
//! ```
//! use lineedits::widget::input_mask::InputMask;
//!
//! let mask = InputMask::new("000.000.000.000;_").unwrap();
//! assert_eq!(mask.display_text("192168"), "192.168.___.___");
//! ```

use std::fmt;

/// Case conversion applied to a mask position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// No case conversion.
    #[default]
    None,
    /// Convert to uppercase.
    Upper,
    /// Convert to lowercase.
    Lower,
}

/// Character class accepted at an editable mask position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `A`/`a`
    Letter,
    /// `N`/`n`
    Alphanumeric,
    /// `X`/`x`
    Any,
    /// `9`/`0`
    Digit,
    /// `D`/`d`
    NonZeroDigit,
    /// `#`
    DigitOrSign,
    /// `H`/`h`
    Hex,
    /// `B`/`b`
    Binary,
}

impl CharClass {
    /// Check if a character belongs to this class.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            CharClass::Letter => ch.is_alphabetic(),
            CharClass::Alphanumeric => ch.is_alphanumeric(),
            CharClass::Any => !ch.is_whitespace(),
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::NonZeroDigit => matches!(ch, '1'..='9'),
            CharClass::DigitOrSign => ch.is_ascii_digit() || ch == '+' || ch == '-',
            CharClass::Hex => ch.is_ascii_hexdigit(),
            CharClass::Binary => ch == '0' || ch == '1',
        }
    }

    /// Map a mask character to its class and whether input is required.
    fn from_mask_char(ch: char) -> Option<(Self, bool)> {
        let entry = match ch {
            'A' => (CharClass::Letter, true),
            'a' => (CharClass::Letter, false),
            'N' => (CharClass::Alphanumeric, true),
            'n' => (CharClass::Alphanumeric, false),
            'X' => (CharClass::Any, true),
            'x' => (CharClass::Any, false),
            '9' => (CharClass::Digit, true),
            '0' => (CharClass::Digit, false),
            'D' => (CharClass::NonZeroDigit, true),
            'd' => (CharClass::NonZeroDigit, false),
            '#' => (CharClass::DigitOrSign, false),
            'H' => (CharClass::Hex, true),
            'h' => (CharClass::Hex, false),
            'B' => (CharClass::Binary, true),
            'b' => (CharClass::Binary, false),
            _ => return None,
        };
        Some(entry)
    }
}

/// A single position of a parsed mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskElement {
    /// A fixed separator shown as-is.
    Literal(char),
    /// An editable position.
    Slot {
        /// Accepted characters.
        class: CharClass,
        /// Whether the position must be filled for the input to be complete.
        required: bool,
        /// Case conversion applied to typed letters.
        case: CaseMode,
    },
}

impl MaskElement {
    /// Returns true if this element is a literal separator.
    pub fn is_literal(&self) -> bool {
        matches!(self, MaskElement::Literal(_))
    }

    /// Returns true if this element must be filled.
    pub fn is_required(&self) -> bool {
        matches!(self, MaskElement::Slot { required: true, .. })
    }

    /// Check if `ch` may be entered at this element.
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            MaskElement::Literal(lit) => *lit == ch,
            MaskElement::Slot { class, .. } => class.accepts(ch),
        }
    }

    /// Apply this element's case conversion to `ch`.
    pub fn transform(&self, ch: char) -> char {
        match self {
            MaskElement::Slot {
                case: CaseMode::Upper,
                ..
            } => ch.to_uppercase().next().unwrap_or(ch),
            MaskElement::Slot {
                case: CaseMode::Lower,
                ..
            } => ch.to_lowercase().next().unwrap_or(ch),
            _ => ch,
        }
    }
}

/// A parsed input mask.
///
/// Text held by a masked widget is the sequence of characters typed into the
/// editable positions, in order, without literals. An optional position that
/// was skipped over by typing a separator holds the blank character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMask {
    pattern: String,
    elements: Vec<MaskElement>,
    blank_char: char,
}

impl InputMask {
    /// Parse a mask pattern.
    ///
    /// Returns `None` for an empty pattern or one with no positions.
    pub fn new(pattern: &str) -> Option<Self> {
        let (mask, blank_char) = split_blank_specifier(pattern);
        let elements = parse_elements(mask);

        if elements.is_empty() {
            return None;
        }

        Some(Self {
            pattern: pattern.to_string(),
            elements,
            blank_char,
        })
    }

    /// The pattern string this mask was parsed from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The character shown for unfilled positions.
    pub fn blank_char(&self) -> char {
        self.blank_char
    }

    /// All positions, literals included.
    pub fn elements(&self) -> &[MaskElement] {
        &self.elements
    }

    /// Number of editable positions.
    pub fn editable_count(&self) -> usize {
        self.elements.iter().filter(|e| !e.is_literal()).count()
    }

    /// Number of positions that must be filled.
    pub fn required_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_required()).count()
    }

    /// Keep the characters of `candidate` that fit the mask, in order.
    ///
    /// A character equal to the literal at the current position consumes the
    /// literal, so both `"192168001001"` and `"192.168.001.001"` fill an IP
    /// mask the same way. A separator typed early jumps to the next matching
    /// literal when only optional positions lie before it; those positions
    /// are left blank, so `"10.0.0.1"` keeps its groups. Characters that fit
    /// nowhere are dropped, and input stops once every editable position is
    /// filled.
    pub fn filter(&self, candidate: &str) -> String {
        self.filter_from(0, candidate)
    }

    /// Like [`filter`](Self::filter), but starts matching at editable
    /// position `start_slot`. Literals between the previous position and
    /// `start_slot` can still be consumed.
    pub fn filter_from(&self, start_slot: usize, candidate: &str) -> String {
        let mut result = String::new();
        let mut pos = match start_slot.checked_sub(1) {
            None => 0,
            Some(previous) => match self.slot_element_index(previous) {
                Some(index) => index + 1,
                None => return result,
            },
        };

        for ch in candidate.chars() {
            if let Some(MaskElement::Literal(lit)) = self.elements.get(pos)
                && *lit == ch
            {
                pos += 1;
                continue;
            }

            while matches!(self.elements.get(pos), Some(MaskElement::Literal(_))) {
                pos += 1;
            }

            let Some(element) = self.elements.get(pos) else {
                break;
            };

            if ch != self.blank_char && element.accepts(ch) {
                result.push(element.transform(ch));
                pos += 1;
            } else if let Some(literal) = self.separator_after(pos, ch) {
                let skipped = self.elements[pos..literal]
                    .iter()
                    .filter(|e| !e.is_literal())
                    .count();
                result.extend(std::iter::repeat_n(self.blank_char, skipped));
                pos = literal + 1;
            }
        }

        result
    }

    /// Index of the first literal `ch` at or after `pos`, provided every
    /// editable position before it is optional.
    fn separator_after(&self, pos: usize, ch: char) -> Option<usize> {
        for (index, element) in self.elements.iter().enumerate().skip(pos) {
            match element {
                MaskElement::Literal(lit) if *lit == ch => return Some(index),
                MaskElement::Literal(_) => {}
                MaskElement::Slot { required: true, .. } => return None,
                MaskElement::Slot { .. } => {}
            }
        }
        None
    }

    /// Keep the longest prefix of `input` whose characters fit their
    /// editable positions, with case conversion applied. Blanks are kept.
    pub fn conform(&self, input: &str) -> String {
        self.elements
            .iter()
            .filter(|e| !e.is_literal())
            .zip(input.chars())
            .map_while(|(element, ch)| {
                if ch == self.blank_char {
                    Some(ch)
                } else {
                    element.accepts(ch).then(|| element.transform(ch))
                }
            })
            .collect()
    }

    fn slot_element_index(&self, slot: usize) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_literal())
            .nth(slot)
            .map(|(index, _)| index)
    }

    /// Render `input` through the mask: literals in place, typed characters
    /// in editable positions, blanks for the rest.
    pub fn display_text(&self, input: &str) -> String {
        let mut typed = input.chars();
        self.elements
            .iter()
            .map(|element| match element {
                MaskElement::Literal(ch) => *ch,
                MaskElement::Slot { .. } => typed
                    .next()
                    .map(|ch| element.transform(ch))
                    .unwrap_or(self.blank_char),
            })
            .collect()
    }

    /// Render `input` with literals but without blanks, the way a masked
    /// widget reports its value. Literals after the last typed character are
    /// only included once every editable position is filled.
    pub fn value_text(&self, input: &str) -> String {
        let mut typed = input.chars();
        let mut result = String::new();
        let mut pending = String::new();

        for element in &self.elements {
            match element {
                MaskElement::Literal(ch) => pending.push(*ch),
                MaskElement::Slot { .. } => match typed.next() {
                    Some(ch) => {
                        result.push_str(&pending);
                        pending.clear();
                        if ch != self.blank_char {
                            result.push(element.transform(ch));
                        }
                    }
                    None => return result,
                },
            }
        }

        result.push_str(&pending);
        result
    }

    /// Whether `input` fills every required position with a non-blank
    /// character.
    pub fn is_complete(&self, input: &str) -> bool {
        let mut typed = input.chars();
        self.elements
            .iter()
            .filter(|e| !e.is_literal())
            .all(|element| {
                let ch = typed.next();
                !element.is_required() || ch.is_some_and(|ch| ch != self.blank_char)
            })
    }
}

impl fmt::Display for InputMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Split an unescaped trailing `;c` off the pattern.
fn split_blank_specifier(pattern: &str) -> (&str, char) {
    let mut escaped = false;
    let mut chars = pattern.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            ';' => {
                if let Some(&(_, blank)) = chars.peek() {
                    return (&pattern[..index], blank);
                }
            }
            _ => {}
        }
    }
    (pattern, ' ')
}

fn parse_elements(mask: &str) -> Vec<MaskElement> {
    let mut elements = Vec::new();
    let mut case = CaseMode::None;
    let mut chars = mask.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    elements.push(MaskElement::Literal(escaped));
                }
            }
            '>' => case = CaseMode::Upper,
            '<' => case = CaseMode::Lower,
            '!' => case = CaseMode::None,
            _ => match CharClass::from_mask_char(ch) {
                Some((class, required)) => elements.push(MaskElement::Slot {
                    class,
                    required,
                    case,
                }),
                None => elements.push(MaskElement::Literal(ch)),
            },
        }
    }

    elements
}
