//! The declarative property table for Pioneer SC/VSX receivers
//!
//! One entry per property: query command(s), write encoder with its accept
//! pattern, receive pattern with its decoder, dependent properties to
//! refresh, feature gate and host metadata. The table is raw data; see
//! [`crate::table::PropertyTable::build`] for expansion and compilation.
//!
//! Naming conventions:
//! - a leading `#` marks an internal property (hook feed only)
//! - `base!(a|b|c)` declares virtual sub-properties `base.a` … `base.c`
//!   decoded together from a single device response

use regex::Captures;

use crate::catalog;
use crate::definition::{
    Decoded, Metadata, PropertyDef, QueryFlags, QuerySpec, RxRule, States, TxRule, ValueType,
};
use crate::value::Value;

fn g<'a>(caps: &'a Captures, i: usize) -> &'a str {
    caps.get(i).map_or("", |m| m.as_str())
}

fn int(caps: &Captures) -> Option<Decoded> {
    Some(Decoded::Value(Value::Int(g(caps, 1).parse().ok()?)))
}

fn zero_is_on(caps: &Captures) -> Option<Decoded> {
    Some(Decoded::Value(Value::Bool(g(caps, 1) == "0")))
}

fn one_is_on(caps: &Captures) -> Option<Decoded> {
    Some(Decoded::Value(Value::Bool(g(caps, 1) == "1")))
}

fn text(caps: &Captures) -> Option<Decoded> {
    Some(Decoded::Value(Value::Str(g(caps, 1).to_string())))
}

/// `RGBnnF<label>` responses describing renamable input slots.
fn decode_input_name(caps: &Captures) -> Option<Decoded> {
    Some(Decoded::Record(vec![
        ("id", Value::Int(g(caps, 1).parse().ok()?)),
        ("isRenamed", Value::Bool(g(caps, 2) == "1")),
        ("name", Value::Str(g(caps, 3).trim().to_string())),
    ]))
}

/// Front panel text: hex-encoded characters with vendor glyph codes.
fn decode_display(caps: &Captures) -> Option<Decoded> {
    let hex = g(caps, 1);
    let mut text = String::with_capacity(hex.len() / 2);
    let bytes = hex.as_bytes();
    let mut i = 0;
    while i + 2 <= bytes.len() {
        let ch = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        text.push(ch as char);
        i += 2;
    }
    for (code, glyph) in catalog::CHAR_MAP {
        text = text.replace(*code, glyph);
    }
    Some(Decoded::Value(Value::Str(text)))
}

/// `VOLnnn` → dB. 001 is -80 dB, 161 is 0 dB, 185 is +12 dB in 0.5 steps.
fn decode_volume(caps: &Captures) -> Option<Decoded> {
    let raw: f64 = g(caps, 1).parse().ok()?;
    Some(Decoded::Value(Value::Float(12.0 - 0.5 * (185.0 - raw))))
}

fn encode_volume(v: &Value) -> Option<String> {
    let db = v.as_f64()?;
    let raw = ((2.0 * (-80.0 - db) - 1.0) * -1.0).round() as i64;
    Some(format!("{:03}VL", raw))
}

/// Tone dB value → `nnBA`/`nnTR` two-digit code, range clamped to ±6 dB.
/// The wire scale is inverted relative to the dB value.
fn encode_tone(v: &Value, suffix: &str) -> Option<String> {
    let db = v.as_f64()?;
    let inverted = (-db).clamp(-6.0, 6.0);
    Some(format!("{:02}{}", (inverted + 6.0).round() as i64, suffix))
}

fn decode_tone(caps: &Captures) -> Option<Decoded> {
    let raw: i64 = g(caps, 1).parse().ok()?;
    Some(Decoded::Value(Value::Int((raw - 6) * -1)))
}

fn decode_listening_mode(caps: &Captures) -> Option<Decoded> {
    let label = catalog::listening_mode(g(caps, 1))?;
    Some(Decoded::Value(Value::Str(label.to_string())))
}

/// `AST` status block: codec/frequency indices plus two channel bitmaps.
fn decode_audio_status(caps: &Captures) -> Option<Decoded> {
    let codec_idx: usize = g(caps, 1).parse().ok()?;
    let freq_idx: usize = g(caps, 2).parse().ok()?;

    let mut input = Vec::new();
    for (i, bit) in g(caps, 3).chars().enumerate() {
        if bit == '1' {
            if let Some(ch) = catalog::CHANNEL_INPUT_FORMAT.get(i) {
                input.push(*ch);
            }
        }
    }
    let mut output = Vec::new();
    for (i, bit) in g(caps, 4).chars().enumerate() {
        if bit == '1' {
            if let Some(ch) = catalog::CHANNEL_OUTPUT_FORMAT.get(i) {
                output.push(*ch);
            }
        }
    }

    let codec = catalog::AUDIO_INPUT_CODEC
        .get(codec_idx)
        .copied()
        .unwrap_or("UNKNOWN");
    let freq = catalog::AUDIO_INPUT_FREQ
        .get(freq_idx)
        .copied()
        .unwrap_or("");

    Some(Decoded::Record(vec![
        ("signal", Value::Str(format!("{} {}", codec, freq))),
        ("channelInFormat", Value::Str(input.join(","))),
        ("channelOutFormat", Value::Str(output.join(","))),
    ]))
}

/// The full raw definition set, in listing order.
pub fn definitions() -> Vec<(&'static str, PropertyDef)> {
    vec![
        (
            "#inputNames",
            PropertyDef {
                query: Some(QuerySpec::many(
                    QueryFlags::C,
                    catalog::RENAMEABLE_INPUT_IDS
                        .iter()
                        .map(|id| format!("?RGB{:02}", id))
                        .collect(),
                )),
                receive: Some(RxRule {
                    pattern: "^RGB([0-9]{2})([0-9])(.+)$",
                    decode: decode_input_name,
                    refresh: &[],
                }),
                ..Default::default()
            },
        ),
        (
            "general.power",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?P")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "PO" } else { "PF" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^PWR([0-1])$",
                    decode: zero_is_on,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "general.selectedInput",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?F")),
                transmit: Some(TxRule {
                    accept: Some("^[0-9]{1,2}$"),
                    encode: |v| Some(format!("{:0>2}FN", v.to_string())),
                }),
                receive: Some(RxRule {
                    pattern: "^FN([0-9]{2})$",
                    decode: int,
                    refresh: &["audio.status.*", "audio.dsp.*", "audio.toneControl.*"],
                }),
                metadata: Some(
                    Metadata::new(ValueType::String, "variable")
                        .with_states(States::Numeric(catalog::SELECTED_INPUT)),
                ),
                ..Default::default()
            },
        ),
        (
            "general.display",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?FL")),
                receive: Some(RxRule {
                    pattern: "^FL[0-9a-fA-F]{2}([0-9a-fA-F]+)$",
                    decode: decode_display,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::String, "variable")),
                ..Default::default()
            },
        ),
        (
            "audio.volume",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?V")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: encode_volume,
                }),
                receive: Some(RxRule {
                    pattern: "^VOL([0-9]{3})$",
                    decode: decode_volume,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Number, "variable").with_unit(" dB")),
                ..Default::default()
            },
        ),
        (
            "audio.buttonVolumeUp",
            PropertyDef {
                feature: Some("BtnVolUpDown"),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |_| Some("VU".to_string()),
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "button")),
                ..Default::default()
            },
        ),
        (
            "audio.buttonVolumeDown",
            PropertyDef {
                feature: Some("BtnVolUpDown"),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |_| Some("VD".to_string()),
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "button")),
                ..Default::default()
            },
        ),
        (
            "audio.mute",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?M")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "MO" } else { "MF" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^MUT([0-1])$",
                    decode: zero_is_on,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "amp.speakerSelect",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?SPK")),
                transmit: Some(TxRule {
                    accept: Some("^[0-39]{1}$"),
                    encode: |v| Some(format!("{v}SPK")),
                }),
                receive: Some(RxRule {
                    pattern: "^SPK([0-3])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::SPEAKER_SELECT)),
                ),
                ..Default::default()
            },
        ),
        (
            "amp.hdmiOutput",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?HO")),
                transmit: Some(TxRule {
                    accept: Some("^[0-29]{1}$"),
                    encode: |v| Some(format!("{v}HO")),
                }),
                receive: Some(RxRule {
                    pattern: "^HO([0-2])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::HDMI_OUTPUT)),
                ),
                ..Default::default()
            },
        ),
        (
            "amp.hdmiAudio",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?HA")),
                transmit: Some(TxRule {
                    accept: Some("^[019]{1}$"),
                    encode: |v| Some(format!("{v}HA")),
                }),
                receive: Some(RxRule {
                    pattern: "^HA([019])$",
                    decode: int,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::HDMI_AUDIO)),
                ),
                ..Default::default()
            },
        ),
        (
            "amp.dimmer",
            PropertyDef {
                transmit: Some(TxRule {
                    accept: Some("^[0-39]{1}$"),
                    encode: |v| Some(format!("{v}SAA")),
                }),
                receive: Some(RxRule {
                    pattern: "^SAA([0-3])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::DIMMER)),
                ),
                ..Default::default()
            },
        ),
        (
            "amp.sleepTimer",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?SAB")),
                transmit: Some(TxRule {
                    accept: Some("^(0|30|60|90|999){1}$"),
                    encode: |v| Some(format!("{:0>3}SAB", v.to_string())),
                }),
                receive: Some(RxRule {
                    pattern: "^SAB([0-9]{3})$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Coded(catalog::SLEEP_TIMER)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.signalSource",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::C, "?SDA")),
                transmit: Some(TxRule {
                    accept: Some("^[0-39]{1}$"),
                    encode: |v| Some(format!("{v}SDA")),
                }),
                receive: Some(RxRule {
                    pattern: "^SDA([0-39])$",
                    decode: int,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::SIGNAL_SOURCE)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.mcaccMemory",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::C, "?MC")),
                transmit: Some(TxRule {
                    accept: Some("^[0-69]{1}$"),
                    encode: |v| Some(format!("{v}MC")),
                }),
                receive: Some(RxRule {
                    pattern: "^MC([0-6])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::MCACC_MEMORY)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.phaseControl",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::C, "?IS")),
                transmit: Some(TxRule {
                    accept: Some("^[0-29]{1}$"),
                    encode: |v| Some(format!("{v}IS")),
                }),
                receive: Some(RxRule {
                    pattern: "^IS([0-2])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "variable")
                        .with_states(States::Numeric(catalog::PHASE_CONTROL)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.virtualSurroundBack",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?VSB")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "1VSB" } else { "0VSB" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^VSB([0-1])$",
                    decode: one_is_on,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.virtualHeight",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?VHT")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "1VHT" } else { "0VHT" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^VHT([0-1])$",
                    decode: one_is_on,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.virtualDepth",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?VDP")),
                transmit: Some(TxRule {
                    accept: Some("^[0-389]{1}$"),
                    encode: |v| Some(format!("{v}VDP")),
                }),
                receive: Some(RxRule {
                    pattern: "^VDP([0-3])$",
                    decode: int,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "switch")
                        .with_states(States::Numeric(catalog::VIRTUAL_DEPTH)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.digitalNoiseReduction",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATG")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "1ATG" } else { "0ATG" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^ATG([0-1])$",
                    decode: one_is_on,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.standingWaveCorrection",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATD")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "1ATD" } else { "0ATD" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^ATD([0-1])$",
                    decode: one_is_on,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.EQ",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATC")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "1ATC" } else { "0ATC" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^ATC([0-1])$",
                    decode: one_is_on,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.soundRetriever",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATA")),
                transmit: Some(TxRule {
                    accept: Some("^[0-189]{1}$"),
                    encode: |v| Some(format!("{v}ATA")),
                }),
                receive: Some(RxRule {
                    pattern: "^ATA([0-1])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "switch")
                        .with_states(States::Numeric(catalog::SOUND_RETRIEVER)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.dialogEnhancement",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATH")),
                transmit: Some(TxRule {
                    accept: Some("^[0-589]{1}$"),
                    encode: |v| Some(format!("{v}ATH")),
                }),
                receive: Some(RxRule {
                    pattern: "^ATH([0-5])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "switch")
                        .with_states(States::Numeric(catalog::DIALOG_ENHANCEMENT)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.DualMono",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATJ")),
                transmit: Some(TxRule {
                    accept: Some("^[0-289]{1}$"),
                    encode: |v| Some(format!("{v}ATJ")),
                }),
                receive: Some(RxRule {
                    pattern: "^ATJ([0-2])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "switch")
                        .with_states(States::Numeric(catalog::DUAL_MONO)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.dsp.dynamicRangeControl",
            PropertyDef {
                feature: Some("DspSettings"),
                query: Some(QuerySpec::new(QueryFlags::CW, "?ATL")),
                transmit: Some(TxRule {
                    accept: Some("^[0-389]{1}$"),
                    encode: |v| Some(format!("{v}ATL")),
                }),
                receive: Some(RxRule {
                    pattern: "^ATL([0-3])$",
                    decode: int,
                    refresh: &[],
                }),
                metadata: Some(
                    Metadata::new(ValueType::Number, "switch")
                        .with_states(States::Numeric(catalog::DYNAMIC_RANGE_CONTROL)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.listeningMode.selected",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?S")),
                transmit: Some(TxRule {
                    accept: Some("^[0-9]{4}$"),
                    encode: |v| Some(format!("{v}SR")),
                }),
                receive: Some(RxRule {
                    pattern: "^SR([0-9]{4})$",
                    decode: text,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(
                    Metadata::new(ValueType::String, "variable")
                        .with_states(States::Coded(catalog::SELECTED_LISTENING_MODE)),
                ),
                ..Default::default()
            },
        ),
        (
            "audio.listeningMode.current",
            PropertyDef {
                query: Some(QuerySpec::new(QueryFlags::C, "?L")),
                receive: Some(RxRule {
                    pattern: "^LM([0-9a-fA-F]{4})$",
                    decode: decode_listening_mode,
                    refresh: &["audio.status.*"],
                }),
                metadata: Some(Metadata::new(ValueType::String, "variable")),
                ..Default::default()
            },
        ),
        (
            "audio.status.!(signal|channelInFormat|channelOutFormat)",
            PropertyDef {
                feature: Some("AudioStatusInfo"),
                query: Some(QuerySpec::new(QueryFlags::C, "?AST")),
                receive: Some(RxRule {
                    pattern: "^AST([0-9]{2})([0-9]{2})([0-1]{21})([0-1]{18})$",
                    decode: decode_audio_status,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::String, "variable")),
                ..Default::default()
            },
        ),
        (
            "audio.toneControl.enabled",
            PropertyDef {
                feature: Some("ToneControl"),
                query: Some(QuerySpec::new(QueryFlags::C, "?TO")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| Some(if v.as_bool()? { "1TO" } else { "0TO" }.to_string()),
                }),
                receive: Some(RxRule {
                    pattern: "^TO([0-1])$",
                    decode: one_is_on,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Boolean, "switch")),
                ..Default::default()
            },
        ),
        (
            "audio.toneControl.bass",
            PropertyDef {
                feature: Some("ToneControl"),
                query: Some(QuerySpec::new(QueryFlags::C, "?BA")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| encode_tone(v, "BA"),
                }),
                receive: Some(RxRule {
                    pattern: "^BA([0-9]{2})$",
                    decode: decode_tone,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Number, "variable").with_unit(" dB")),
                ..Default::default()
            },
        ),
        (
            "audio.toneControl.treble",
            PropertyDef {
                feature: Some("ToneControl"),
                query: Some(QuerySpec::new(QueryFlags::C, "?TR")),
                transmit: Some(TxRule {
                    accept: None,
                    encode: |v| encode_tone(v, "TR"),
                }),
                receive: Some(RxRule {
                    pattern: "^TR([0-9]{2})$",
                    decode: decode_tone,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::Number, "variable").with_unit(" dB")),
                ..Default::default()
            },
        ),
        (
            "netradio.station",
            PropertyDef {
                feature: Some("NetRadio"),
                receive: Some(RxRule {
                    pattern: "^GEP02020(.+)$",
                    decode: text,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::String, "variable")),
                ..Default::default()
            },
        ),
        (
            "netradio.bitrate",
            PropertyDef {
                feature: Some("NetRadio"),
                receive: Some(RxRule {
                    pattern: "^GEP06029(.+)$",
                    decode: text,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::String, "media.bitrate")),
                ..Default::default()
            },
        ),
        (
            "netradio.description",
            PropertyDef {
                feature: Some("NetRadio"),
                receive: Some(RxRule {
                    pattern: "^GEP01032(.+)$",
                    decode: text,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::String, "variable")),
                ..Default::default()
            },
        ),
        (
            "netradio.icon",
            PropertyDef {
                feature: Some("NetRadio"),
                receive: Some(RxRule {
                    pattern: "^GIC049(.+)$",
                    decode: text,
                    refresh: &[],
                }),
                metadata: Some(Metadata::new(ValueType::String, "text.url")),
                ..Default::default()
            },
        ),
    ]
}
