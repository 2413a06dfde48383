//! ACS OPEN-script scanning for sector colour bindings.
//!
//! The embedded script source is not executed. It is scanned, token by
//! token, for `script <n> OPEN { ... }` bodies, and within those only
//! `Sector_SetColor` calls are interpreted. This is deliberately not an
//! expression parser: parameters are read as a flat list of numeric
//! literals in positional order, and anything else between the parentheses
//! is ignored. Real-world scripts rely on that leniency.

use bevy::prelude::*;

use crate::tokenizer::Tokenizer;

/// Token-breaking characters for ACS sources.
const ACS_SPECIAL_CHARS: &[u8] = b";,:|={}/()";

/// An RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A sector-tag to colour binding extracted from an OPEN script.
///
/// Tags are non-unique; lookup is defined as the first binding in scan
/// order whose tag matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourBinding {
    pub tag: i32,
    pub colour: Rgba,
}

fn channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Scan a raw script source for `Sector_SetColor` calls inside OPEN
/// scripts.
///
/// Bindings from multiple OPEN scripts accumulate in scan order. An empty
/// buffer yields an empty list, not an error. Calls with fewer than four
/// numeric parameters are dropped with a diagnostic.
pub fn extract_sector_colours(data: &[u8]) -> Vec<ColourBinding> {
    let mut colours = Vec::new();
    if data.is_empty() {
        return colours;
    }

    let mut tz = Tokenizer::new(data).with_special_characters(ACS_SPECIAL_CHARS);
    while let Some(token) = tz.next_token() {
        if !token.eq_ignore_ascii_case("script") {
            continue;
        }
        debug!("script found");

        // Skip the script number.
        tz.skip_token();
        let Some(mut token) = tz.next_token() else {
            break;
        };
        if !token.eq_ignore_ascii_case("open") {
            continue;
        }
        debug!("script is OPEN");

        // Skip to the opening brace.
        while token != "{" {
            match tz.next_token() {
                Some(next) => token = next,
                None => return colours,
            }
        }

        // Scan the script body.
        loop {
            match tz.next_token() {
                Some(next) => token = next,
                None => return colours,
            }
            if token == "}" {
                break;
            }
            if !token.eq_ignore_ascii_case("Sector_SetColor") {
                continue;
            }

            let parameters = tz.tokens_until(")");
            let values: Vec<i32> = parameters
                .iter()
                .filter_map(|p| p.parse::<i32>().ok())
                .collect();
            // First four numeric literals are tag, red, green, blue.
            if values.len() < 4 {
                warn!("Invalid Sector_SetColor parameters");
                continue;
            }

            let (tag, r, g, b) = (values[0], values[1], values[2], values[3]);
            debug!("Sector tag {tag}, colour {r},{g},{b}");
            colours.push(ColourBinding {
                tag,
                colour: Rgba::new(channel(r), channel(g), channel(b), 255),
            });
        }
    }

    colours
}
