use anyhow::{anyhow, bail, Result};
use nom::{
    character::complete::{one_of, u32},
    combinator::all_consuming,
    sequence::separated_pair,
    IResult,
};

use super::lexer::ws;

/// Parse a surface size such as `600x400`
pub fn parse_size(input: &str) -> Result<(u32, u32)> {
    let (_, (width, height)) = all_consuming(ws(dimensions))(input)
        .map_err(|e| anyhow!("Invalid size '{}': {}", input, e))?;

    if width == 0 || height == 0 {
        bail!("Invalid size '{}': width and height must be positive", input);
    }
    Ok((width, height))
}

fn dimensions(input: &str) -> IResult<&str, (u32, u32)> {
    separated_pair(u32, one_of("xX×"), u32)(input)
}
