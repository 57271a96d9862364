//! Terminal card rendering
//!
//! One-shot styled output for the resolved item or the error fallback. The
//! card background derives from the amiibo series through a static color
//! table, lightened a step so the text stays readable on every series.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::data::Amiibo;

const CARD_WIDTH: usize = 46;

const TITLE_COLOR: Color = Color::Rgb {
    r: 0x13,
    g: 0x13,
    b: 0x13,
};
const INFO_COLOR: Color = Color::Rgb {
    r: 0x38,
    g: 0x38,
    b: 0x38,
};

/// Base background color for an amiibo series, `#EEEEEE` when unmapped
pub fn series_base_color(series: &str) -> (u8, u8, u8) {
    let hex: u32 = match series {
        "Legend Of Zelda" => 0xc7fc89,
        "Super Smash Bros." => 0xa0a0a1,
        "Super Mario Bros." => 0xe95757,
        "Pikmin" => 0xc49a88,
        "Fire Emblem" => 0xda6e71,
        "Metroid" => 0x76adc0,
        "Splatoon" => 0x989da0,
        "Kirby" => 0x64aef7,
        "Animal Crossing" => 0x92e7c6,
        "Shovel Knight" => 0x98c7d9,
        "8-bit Mario" => 0x4eb887,
        "Yoshi's Woolly World" => 0xadd58f,
        "Mega Man" => 0xe95757,
        "Error" => 0xffffff,
        _ => 0xeeeeee,
    };
    ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Adjusts every channel by `amount`, clamping to the valid range
pub fn lighten((r, g, b): (u8, u8, u8), amount: i16) -> (u8, u8, u8) {
    let adjust = |channel: u8| (i16::from(channel) + amount).clamp(0, 255) as u8;
    (adjust(r), adjust(g), adjust(b))
}

fn centered(text: &str) -> String {
    format!("{text:^width$}", width = CARD_WIDTH)
}

fn card_line(out: &mut impl Write, bg: Color, fg: Color, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(centered(text)),
        ResetColor,
        Print("\n")
    )
}

fn title_line(out: &mut impl Write, bg: Color, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(bg),
        SetForegroundColor(TITLE_COLOR),
        SetAttribute(Attribute::Bold),
        Print(centered(text)),
        SetAttribute(Attribute::NormalIntensity),
        ResetColor,
        Print("\n")
    )
}

/// Renders the resolved item as a styled card
pub fn render_item(out: &mut impl Write, amiibo: &Amiibo, image_len: usize) -> io::Result<()> {
    let bg_rgb = lighten(series_base_color(&amiibo.amiibo_series), 40);
    let bg = Color::Rgb {
        r: bg_rgb.0,
        g: bg_rgb.1,
        b: bg_rgb.2,
    };

    let info = format!(
        "{} • {} • {}",
        amiibo.character, amiibo.game_series, amiibo.amiibo_series
    );
    let image_info = format!("image cached ({:.1} KiB)", image_len as f64 / 1024.0);

    card_line(out, bg, INFO_COLOR, "")?;
    title_line(out, bg, &amiibo.name)?;
    card_line(out, bg, INFO_COLOR, "")?;
    card_line(out, bg, INFO_COLOR, &info)?;
    card_line(out, bg, INFO_COLOR, &image_info)?;
    card_line(out, bg, INFO_COLOR, "")?;
    out.flush()
}

/// Renders the error card, naming the fallback item when one is available
pub fn render_error(out: &mut impl Write, fallback: Option<&Amiibo>) -> io::Result<()> {
    let bg_rgb = lighten(series_base_color("Error"), 40);
    let bg = Color::Rgb {
        r: bg_rgb.0,
        g: bg_rgb.1,
        b: bg_rgb.2,
    };

    card_line(out, bg, INFO_COLOR, "")?;
    title_line(out, bg, "Oh no! No amiibo was found.")?;
    card_line(out, bg, INFO_COLOR, "")?;
    card_line(out, bg, INFO_COLOR, "Something went wrong.")?;
    card_line(out, bg, INFO_COLOR, "Please try again later.")?;
    if let Some(amiibo) = fallback {
        card_line(out, bg, INFO_COLOR, &format!("(fallback: {})", amiibo.name))?;
    }
    card_line(out, bg, INFO_COLOR, "")?;
    out.flush()
}
