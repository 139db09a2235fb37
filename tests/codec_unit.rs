//! Unit tests for the compressed buffer codec.
//!
//! These tests verify:
//! - Exact wire bytes for known inputs
//! - Round-trips for both codec strategies
//! - Literal/escape thresholds and long-run splitting
//! - Rejection of truncated and inconsistent buffers

use ascii_store::art::{AsciiImage, StyleCode};
use ascii_store::ascii::PALETTE;
use ascii_store::codec::{
    decode, encode, Codec, CodecError, CodecKind, Malformed, HEADER_LEN, SENTINEL,
};

fn codecs() -> [&'static dyn Codec; 2] {
    [CodecKind::Reference.codec(), CodecKind::Chunked.codec()]
}

/// Small xorshift generator so the grids are varied but reproducible.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// A grid with runs of varying length drawn from the palette.
fn runny_image(rng: &mut Rng, width: u16, height: u16, style: StyleCode) -> AsciiImage {
    let total = width as usize * height as usize;
    let mut cells = Vec::with_capacity(total);
    while cells.len() < total {
        let symbol = PALETTE[rng.below(PALETTE.len() as u64) as usize];
        let run = match rng.below(4) {
            0 => 1,
            1 => 1 + rng.below(3) as usize,
            2 => 4 + rng.below(20) as usize,
            _ => 200 + rng.below(400) as usize,
        };
        let run = run.min(total - cells.len());
        cells.extend(std::iter::repeat(symbol).take(run));
    }
    AsciiImage::new(cells, width, height, style).unwrap()
}

/// Split a body into (count, byte) runs as the decoder would see them.
fn body_runs(body: &[u8]) -> Vec<(Option<u8>, u8)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < body.len() {
        if body[i] == SENTINEL {
            runs.push((Some(body[i + 1]), body[i + 2]));
            i += 3;
        } else {
            runs.push((None, body[i]));
            i += 1;
        }
    }
    runs
}

// ==================== Known Buffers ====================

#[test]
fn test_scenario_short_runs_stay_literal() {
    let art = AsciiImage::from_text("aab\nbbb", StyleCode::WhiteOnBlack).unwrap();
    let expected: [u8; 12] = [
        0x00, 0x00, 0x03, 0x00, 0x02, 0x61, 0x61, 0x62, 0x0A, 0x62, 0x62, 0x62,
    ];
    for codec in codecs() {
        assert_eq!(codec.encode(&art).unwrap(), expected, "{}", codec.name());
        assert_eq!(codec.decode(&expected).unwrap(), art);
    }
}

#[test]
fn test_scenario_long_run_splits_at_255() {
    let art = AsciiImage::new(vec![b'#'; 300], 300, 1, StyleCode::WhiteOnBlack).unwrap();
    for codec in codecs() {
        let buf = codec.encode(&art).unwrap();
        assert_eq!(&buf[..HEADER_LEN], &[0x00, 0x01, 0x2C, 0x00, 0x01]);
        assert_eq!(&buf[HEADER_LEN..], &[0x00, 0xFF, 0x23, 0x00, 0x2D, 0x23]);
        assert_eq!(codec.decode(&buf).unwrap(), art);
    }
}

#[test]
fn test_scenario_declared_size_mismatch() {
    // 3x2 declares 7 stream bytes; the body only yields 6
    let short: [u8; 11] = [0x00, 0x00, 0x03, 0x00, 0x02, b'a', b'a', b'b', b'\n', b'b', b'b'];
    // and here it yields 8
    let long: [u8; 13] = [
        0x00, 0x00, 0x03, 0x00, 0x02, b'a', b'a', b'b', b'\n', b'b', b'b', b'b', b'b',
    ];
    for codec in codecs() {
        assert_eq!(
            codec.decode(&short),
            Err(CodecError::MalformedBuffer(Malformed::LengthMismatch {
                expected: 7,
                actual: 6
            }))
        );
        assert!(codec.decode(&long).unwrap_err().is_malformed());
    }
}

#[test]
fn test_style_byte_is_first() {
    let art = AsciiImage::from_text("@", StyleCode::BlackOnWhite).unwrap();
    assert_eq!(encode(&art).unwrap(), [0x01, 0x00, 0x01, 0x00, 0x01, b'@']);
}

// ==================== Round Trips ====================

#[test]
fn test_round_trip_random_grids() {
    let mut rng = Rng(0x5eed_1234_abcd_0001);
    for _ in 0..60 {
        let width = 1 + rng.below(120) as u16;
        let height = 1 + rng.below(40) as u16;
        let style = if rng.below(2) == 0 {
            StyleCode::WhiteOnBlack
        } else {
            StyleCode::BlackOnWhite
        };
        let art = runny_image(&mut rng, width, height, style);
        for codec in codecs() {
            let buf = codec.encode(&art).unwrap();
            assert_eq!(codec.decode(&buf).unwrap(), art, "{}", codec.name());
        }
    }
}

#[test]
fn test_round_trip_extreme_shapes() {
    let mut rng = Rng(42);
    for (width, height) in [(1, 1), (u16::MAX, 1), (1, u16::MAX), (2, 2)] {
        let art = runny_image(&mut rng, width, height, StyleCode::WhiteOnBlack);
        for codec in codecs() {
            let buf = codec.encode(&art).unwrap();
            assert_eq!(codec.decode(&buf).unwrap(), art);
        }
    }
}

#[test]
fn test_strategies_emit_identical_bytes() {
    let mut rng = Rng(7);
    let [reference, chunked] = codecs();
    for _ in 0..30 {
        let art = runny_image(&mut rng, 64, 16, StyleCode::BlackOnWhite);
        assert_eq!(reference.encode(&art).unwrap(), chunked.encode(&art).unwrap());
    }
}

#[test]
fn test_every_palette_symbol_survives() {
    let art = AsciiImage::new(PALETTE.to_vec(), 4, 2, StyleCode::WhiteOnBlack).unwrap();
    assert_eq!(decode(&encode(&art).unwrap()).unwrap(), art);
}

// ==================== Format Properties ====================

#[test]
fn test_header_is_always_five_bytes() {
    let mut rng = Rng(99);
    for _ in 0..20 {
        let width = 1 + rng.below(50) as u16;
        let height = 1 + rng.below(50) as u16;
        let art = runny_image(&mut rng, width, height, StyleCode::BlackOnWhite);
        let buf = encode(&art).unwrap();
        assert_eq!(buf[0], 1);
        assert_eq!(u16::from_be_bytes([buf[1], buf[2]]), width);
        assert_eq!(u16::from_be_bytes([buf[3], buf[4]]), height);
        assert!(buf.len() > HEADER_LEN);
    }
}

#[test]
fn test_escape_counts_are_never_zero_and_sum_to_run() {
    let art = AsciiImage::new(vec![b'o'; 1000], 1000, 1, StyleCode::WhiteOnBlack).unwrap();
    let buf = encode(&art).unwrap();
    let runs = body_runs(&buf[HEADER_LEN..]);

    assert!(runs.len() >= 2);
    let mut total = 0usize;
    for (count, byte) in runs {
        let count = count.expect("long runs are escaped");
        assert_ne!(count, 0);
        assert_eq!(byte, b'o');
        total += count as usize;
    }
    assert_eq!(total, 1000);
}

#[test]
fn test_three_is_literal_four_is_escaped() {
    let three = AsciiImage::from_text("***", StyleCode::WhiteOnBlack).unwrap();
    let four = AsciiImage::from_text("****", StyleCode::WhiteOnBlack).unwrap();

    assert_eq!(&encode(&three).unwrap()[HEADER_LEN..], b"***");
    assert_eq!(&encode(&four).unwrap()[HEADER_LEN..], &[SENTINEL, 4, b'*']);
}

#[test]
fn test_random_bodies_never_hold_literal_sentinel() {
    let mut rng = Rng(0xdead_beef);
    for _ in 0..20 {
        let art = runny_image(&mut rng, 80, 20, StyleCode::WhiteOnBlack);
        let buf = encode(&art).unwrap();
        for (count, byte) in body_runs(&buf[HEADER_LEN..]) {
            assert_ne!(byte, SENTINEL);
            if let Some(count) = count {
                assert_ne!(count, 0);
            }
        }
    }
}

// ==================== Corruption ====================

#[test]
fn test_truncation_is_always_rejected() {
    let mut rng = Rng(0xc0ffee);
    let mut arts = vec![
        AsciiImage::from_text("@", StyleCode::WhiteOnBlack).unwrap(),
        AsciiImage::from_text("aab\nbbb", StyleCode::WhiteOnBlack).unwrap(),
        AsciiImage::new(vec![b'#'; 300], 300, 1, StyleCode::BlackOnWhite).unwrap(),
    ];
    for _ in 0..20 {
        let width = 1 + rng.below(30) as u16;
        let height = 1 + rng.below(10) as u16;
        arts.push(runny_image(&mut rng, width, height, StyleCode::WhiteOnBlack));
    }

    for art in &arts {
        for codec in codecs() {
            let buf = codec.encode(art).unwrap();
            for cut in 1..=4 {
                let Some(len) = buf.len().checked_sub(cut) else {
                    continue;
                };
                let err = codec.decode(&buf[..len]).unwrap_err();
                assert!(err.is_malformed(), "cut {} gave {:?}", cut, err);
            }
        }
    }
}

#[test]
fn test_short_header_rejected() {
    for codec in codecs() {
        assert_eq!(
            codec.decode(&[]),
            Err(CodecError::MalformedBuffer(Malformed::ShortHeader { len: 0 }))
        );
        assert!(codec.decode(&[0, 0, 1, 0]).unwrap_err().is_malformed());
    }
}

#[test]
fn test_unknown_style_code_rejected() {
    for codec in codecs() {
        assert_eq!(
            codec.decode(&[2, 0, 1, 0, 1, b'@']),
            Err(CodecError::InvalidStyleCode(2))
        );
    }
}

#[test]
fn test_zero_count_escape_rejected() {
    for codec in codecs() {
        let err = codec.decode(&[0, 0, 1, 0, 1, SENTINEL, 0, b'@', b'@']).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedBuffer(Malformed::ZeroRun { offset: 0 })
        );
    }
}

#[test]
fn test_escape_truncated_at_end_rejected() {
    for codec in codecs() {
        let err = codec.decode(&[0, 0, 5, 0, 1, SENTINEL, 5]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedBuffer(Malformed::TruncatedEscape { offset: 0 })
        );
    }
}

#[test]
fn test_escaped_sentinel_value_rejected() {
    for codec in codecs() {
        let err = codec.decode(&[0, 0, 4, 0, 1, SENTINEL, 4, 0x00]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedBuffer(Malformed::BadCell { offset: 0, byte: 0 })
        );
    }
}

#[test]
fn test_separator_in_wrong_place_rejected() {
    // 2x2 grid whose newline sits after the first cell
    for codec in codecs() {
        let err = codec.decode(&[0, 0, 2, 0, 2, b'a', b'\n', b'b', b'c', b'd']).unwrap_err();
        assert!(err.is_malformed());
    }
}
