use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{alpha1, char},
    combinator::{all_consuming, map, map_opt, map_res},
    sequence::{preceded, tuple},
    IResult,
};
use plotters::style::RGBColor;

use super::lexer::ws;

/// Parse a fill color: `#rrggbb`, `#rgb` or a CSS color name
pub fn parse_color(input: &str) -> Result<RGBColor> {
    all_consuming(ws(color_literal))(input)
        .map(|(_, color)| color)
        .map_err(|e| anyhow!("Invalid color '{}': {}", input, e))
}

pub fn color_literal(input: &str) -> IResult<&str, RGBColor> {
    alt((hex_color, map_opt(alpha1, named_color)))(input)
}

fn hex_color(input: &str) -> IResult<&str, RGBColor> {
    preceded(
        char('#'),
        alt((
            map(tuple((hex_pair, hex_pair, hex_pair)), |(r, g, b)| RGBColor(r, g, b)),
            map(tuple((hex_single, hex_single, hex_single)), |(r, g, b)| RGBColor(r, g, b)),
        )),
    )(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

// `#abc` is shorthand for `#aabbcc`
fn hex_single(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16).map(|v| v * 17)
    })(input)
}

fn named_color(name: &str) -> Option<RGBColor> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => RGBColor(0, 0, 0),
        "white" => RGBColor(255, 255, 255),
        "red" => RGBColor(255, 0, 0),
        "green" => RGBColor(0, 128, 0),
        "blue" => RGBColor(0, 0, 255),
        "yellow" => RGBColor(255, 255, 0),
        "cyan" => RGBColor(0, 255, 255),
        "magenta" => RGBColor(255, 0, 255),
        "orange" => RGBColor(255, 165, 0),
        "purple" => RGBColor(128, 0, 128),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "steelblue" => RGBColor(70, 130, 180),
        "teal" => RGBColor(0, 128, 128),
        "seagreen" => RGBColor(46, 139, 87),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#69b3a2").unwrap(), RGBColor(0x69, 0xb3, 0xa2));
        assert_eq!(parse_color(" #FFF ").unwrap(), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("SteelBlue").unwrap(), RGBColor(70, 130, 180));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#abcd").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
        assert!(parse_color("").is_err());
    }
}
