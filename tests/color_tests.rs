use approx::assert_relative_eq;
use palette::Srgb;
use fieldkit::color::{Hsba, describe, hsb_to_rgb, rgb_to_hsb, to_hex};

fn channel_distance(a: Srgb<u8>, b: Srgb<u8>) -> u8 {
    a.red
        .abs_diff(b.red)
        .max(a.green.abs_diff(b.green))
        .max(a.blue.abs_diff(b.blue))
}

#[test]
fn test_pure_red_is_hue_zero() {
    let hsb = rgb_to_hsb(Srgb::new(255u8, 0, 0));
    assert_relative_eq!(hsb.hue, 0.0);
    assert_relative_eq!(hsb.saturation, 100.0);
    assert_relative_eq!(hsb.brightness, 100.0);
}

#[test]
fn test_black_has_no_saturation() {
    let hsb = rgb_to_hsb(Srgb::new(0u8, 0, 0));
    assert_relative_eq!(hsb.hue, 0.0);
    assert_relative_eq!(hsb.saturation, 0.0);
    assert_relative_eq!(hsb.brightness, 0.0);
}

#[test]
fn test_primary_and_secondary_hues() {
    let cases = [
        (Srgb::new(255u8, 255, 0), 60.0),
        (Srgb::new(0u8, 255, 0), 120.0),
        (Srgb::new(0u8, 255, 255), 180.0),
        (Srgb::new(0u8, 0, 255), 240.0),
        (Srgb::new(255u8, 0, 255), 300.0),
    ];
    for (rgb, hue) in cases {
        assert_relative_eq!(rgb_to_hsb(rgb).hue, hue, epsilon = 1e-9);
        assert_eq!(hsb_to_rgb(hue, 100.0, 100.0), rgb, "hue {hue}");
    }
}

#[test]
fn test_round_trip_within_one_per_channel() {
    for r in 0..=255u8 {
        for g in 0..=255u8 {
            for b in 0..=255u8 {
                let rgb = Srgb::new(r, g, b);
                let hsb = rgb_to_hsb(rgb);
                let back = hsb_to_rgb(hsb.hue, hsb.saturation, hsb.brightness);
                assert!(
                    channel_distance(rgb, back) <= 1,
                    "{} came back as {}",
                    to_hex(rgb),
                    to_hex(back)
                );
            }
        }
    }
}

#[test]
fn test_grays_round_trip_exactly() {
    for v in 0..=255u8 {
        let rgb = Srgb::new(v, v, v);
        let hsb = rgb_to_hsb(rgb);
        assert_eq!(hsb_to_rgb(hsb.hue, hsb.saturation, hsb.brightness), rgb);
    }
}

#[test]
fn test_hue_sweep_has_no_jumps() {
    let mut previous = hsb_to_rgb(0.0, 100.0, 100.0);
    for tenth in 1..3600 {
        let current = hsb_to_rgb(f64::from(tenth) / 10.0, 100.0, 100.0);
        assert!(
            channel_distance(previous, current) <= 1,
            "jump at {}°: {} -> {}",
            f64::from(tenth) / 10.0,
            to_hex(previous),
            to_hex(current)
        );
        previous = current;
    }
}

#[test]
fn test_parse_hex_forms() {
    let red = Hsba::parse("#ff0000").unwrap();
    assert_relative_eq!(red.hue(), 0.0);
    assert_relative_eq!(red.saturation(), 100.0);
    assert_relative_eq!(red.brightness(), 100.0);
    assert_relative_eq!(red.alpha(), 100.0);

    let translucent = Hsba::parse("#ff000080").unwrap();
    assert_relative_eq!(translucent.alpha(), 128.0 / 255.0 * 100.0);

    assert!(Hsba::parse("#fff").is_none());
    assert!(Hsba::parse("#gg0000").is_none());
}

#[test]
fn test_parse_rgb_functions() {
    let blue = Hsba::parse("rgba(0, 0, 255, 0.5)").unwrap();
    assert_eq!(blue.into_srgb(), Srgb::new(0, 0, 255));
    assert_relative_eq!(blue.alpha(), 50.0);

    let embedded = Hsba::parse("color: rgb(0,128,0)").unwrap();
    assert_eq!(embedded.into_srgb(), Srgb::new(0, 128, 0));

    // Channels above 255 clamp
    let clamped = Hsba::parse("rgb(300, 0, 0)").unwrap();
    assert_eq!(clamped.into_srgb(), Srgb::new(255, 0, 0));

    assert!(Hsba::parse("rgb(1, 2)").is_none());
}

#[test]
fn test_empty_and_transparent_parse_to_transparent_white() {
    for text in ["", "transparent"] {
        let color = Hsba::parse(text).unwrap();
        assert_eq!(color.into_srgb(), Srgb::new(255, 255, 255));
        assert_relative_eq!(color.alpha(), 0.0);
    }
}

#[test]
fn test_malformed_input_keeps_state() {
    let mut color = Hsba::new(200.0, 40.0, 60.0, 80.0);
    let before = color;
    assert!(!color.apply("notacolor"));
    assert_eq!(color, before);
    assert!("notacolor".parse::<Hsba>().is_err());
}

#[test]
fn test_hue_wraps_and_percentages_clamp() {
    let mut color = Hsba::default();
    color.set_hue(-30.0);
    assert_relative_eq!(color.hue(), 330.0);
    color.set_hue(720.0);
    assert_relative_eq!(color.hue(), 0.0);

    color.set_saturation(150.0);
    color.set_brightness(-5.0);
    color.set_alpha(f64::NAN);
    assert_relative_eq!(color.saturation(), 100.0);
    assert_relative_eq!(color.brightness(), 0.0);
    assert_relative_eq!(color.alpha(), 0.0);
}

#[test]
fn test_css_serialization_depends_on_alpha() {
    assert_eq!(Hsba::new(240.0, 100.0, 100.0, 100.0).to_css(), "#0000ff");
    assert_eq!(
        Hsba::new(240.0, 100.0, 100.0, 25.0).to_css(),
        "rgba(0, 0, 255, 0.25)"
    );
    assert_eq!(Hsba::new(240.0, 100.0, 100.0, 25.0).to_hex(), "#0000ff");
}

#[test]
fn test_set_rgb_keeps_alpha() {
    let mut color = Hsba::new(0.0, 100.0, 100.0, 40.0);
    color.set_rgb(Srgb::new(0, 255, 0));
    assert_relative_eq!(color.hue(), 120.0);
    assert_relative_eq!(color.alpha(), 40.0);
}

#[test]
fn test_describe_accepts_any_css_color() {
    let named = describe("red").unwrap();
    assert_eq!(named.hex, "#ff0000");
    assert_eq!(named.css, "#ff0000");
    assert_eq!(named.rgba, [255, 0, 0, 255]);

    let hsl = describe("hsl(120, 100%, 50%)").unwrap();
    assert_eq!(hsl.hex, "#00ff00");
    assert_relative_eq!(hsl.hue, 120.0);

    let short = describe("#00f").unwrap();
    assert_eq!(short.hex, "#0000ff");

    assert!(describe("not a color").is_err());
}
