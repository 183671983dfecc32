use anyhow::{Result, anyhow, bail};
use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{anychar, char};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::{IResult, Parser};

use crate::input::keys::{KeyToken, NamedKey};

#[derive(Debug, PartialEq)]
enum Piece<'a> {
    Bracketed(&'a str),
    Plain(char),
}

fn bracketed(input: &str) -> IResult<&str, Piece<'_>> {
    delimited(
        char('<'),
        take_while1(|c: char| c != '<' && c != '>'),
        char('>'),
    )
    .map(Piece::Bracketed)
    .parse(input)
}

fn plain(input: &str) -> IResult<&str, Piece<'_>> {
    let (input, c) = anychar(input)?;
    Ok((input, Piece::Plain(c)))
}

fn pieces(input: &str) -> IResult<&str, Vec<Piece<'_>>> {
    many0(alt((bracketed, plain))).parse(input)
}

fn single(inner: &str) -> Result<KeyToken> {
    match inner {
        "lt" => Ok(KeyToken::Char('<')),
        "gt" => Ok(KeyToken::Char('>')),
        _ => KeyToken::parse(inner),
    }
}

fn modifier(prefix: &str) -> Option<NamedKey> {
    match prefix {
        "C" => Some(NamedKey::Ctrl),
        "A" | "M" => Some(NamedKey::Alt),
        "S" => Some(NamedKey::Shift),
        "D" => Some(NamedKey::Cmd),
        _ => None,
    }
}

fn expand(inner: &str) -> Result<Vec<KeyToken>> {
    if let Some((prefix, rest)) = inner.split_once('-') {
        if !rest.is_empty() {
            let held = modifier(prefix)
                .ok_or_else(|| anyhow!("Unknown modifier '{}' in '<{}>'", prefix, inner))?;
            return Ok(vec![KeyToken::Named(held), single(rest)?]);
        }
    }
    Ok(vec![single(inner)?])
}

/// Parses Vim-style key notation into logical tokens.
///
/// `":wq<Enter>"` gives `:`, `w`, `q`, `Enter`; a chord such as `"<C-d>"`
/// expands to the two positions `Ctrl`, `d`. A `<` that does not open a
/// bracket is taken literally, so `"<<"` is two `<` keys.
pub fn parse_key_sequence(input: &str) -> Result<Vec<KeyToken>> {
    let (remain, pieces) = pieces(input).map_err(|_| anyhow!("Failed to parse key sequence"))?;
    if !remain.is_empty() {
        bail!("Unexpected input after key sequence: '{}'", remain);
    }

    let mut tokens = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Plain(c) => tokens.push(KeyToken::from_char(c)),
            Piece::Bracketed(inner) => tokens.extend(expand(inner)?),
        }
    }
    Ok(tokens)
}
