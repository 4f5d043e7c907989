use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use fieldkit::fields::{
    AnimationField, AnimationProperty, BoxSide, ButtonGroup, ChoiceGroup, CollapsibleSection,
    ColorPicker, CustomCssField, Device, Field, HiddenInput, Placement, Rect, ResetButton,
    ResponsiveTabs, Select, SelectKey, Sides, Size, SpacingBox, SpacingTarget, StyleState,
    TextInput, Toggle, TooltipController, TooltipTiming, TooltipTrigger, TypographyField,
    TypographyProperty, choices, place_tooltip, text_align_choices,
};
use fieldkit::mapper::{Range, Track};

fn fruit() -> Select {
    Select::new(
        "fruit",
        choices(&[("a", "Apple"), ("b", "Banana"), ("c", "Cherry")]),
    )
}

// ============================================================================
// Toggle
// ============================================================================

#[test]
fn test_toggle_submits_one_or_zero() {
    let mut toggle = Toggle::new("t", false);
    assert_eq!(toggle.value(), "0");
    assert!(toggle.toggle());
    assert_eq!(toggle.value(), "1");

    toggle.load("off").unwrap();
    assert!(!toggle.is_checked());
    assert!(toggle.load("maybe").is_err());
}

#[test]
fn test_disabled_toggle_ignores_flips() {
    let mut toggle = Toggle::new("t", true);
    toggle.disabled = true;
    assert!(!toggle.toggle());
    assert!(toggle.is_checked());
}

// ============================================================================
// Select
// ============================================================================

#[test]
fn test_select_keyboard_flow() {
    let mut select = fruit();
    assert_eq!(select.display(), "Select...");
    assert!(select.shows_placeholder());

    assert!(!select.key(SelectKey::Down));
    assert!(select.is_open());
    assert_eq!(select.highlighted(), None);

    select.key(SelectKey::Down);
    select.key(SelectKey::Down);
    assert_eq!(select.highlighted(), Some(1));

    // Never moves past the last option
    select.key(SelectKey::Down);
    select.key(SelectKey::Down);
    assert_eq!(select.highlighted(), Some(2));
    select.key(SelectKey::Up);

    assert!(select.key(SelectKey::Enter));
    assert!(!select.is_open());
    assert_eq!(select.value(), "b");
    assert_eq!(select.display(), "Banana");
}

#[test]
fn test_select_enter_without_highlight_toggles() {
    let mut select = fruit();
    assert!(!select.key(SelectKey::Enter));
    assert!(select.is_open());
    assert!(!select.key(SelectKey::Enter));
    assert!(!select.is_open());
}

#[test]
fn test_select_search_is_case_insensitive() {
    let mut select = fruit();
    select.open();
    select.push_query('A');
    select.push_query('n');
    let visible: Vec<&str> = select.visible_options().map(|c| c.value.as_str()).collect();
    assert_eq!(visible, ["b"]);

    assert!(select.select_visible(0));
    assert_eq!(select.value(), "b");
    assert!(!select.select_visible(5));
}

#[test]
fn test_grouped_select_filters_within_groups() {
    let mut select = Select::grouped(
        "food",
        vec![
            ChoiceGroup {
                label: "Fruit".to_string(),
                options: choices(&[("apple", "Apple"), ("pear", "Pear")]),
            },
            ChoiceGroup {
                label: "Vegetables".to_string(),
                options: choices(&[("pea", "Pea"), ("leek", "Leek")]),
            },
        ],
    );
    select.open();
    select.set_query("pe");
    let groups = select.visible_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, Some("Fruit"));
    assert_eq!(groups[0].1.len(), 1);

    select.set_query("leek");
    let groups = select.visible_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].0, Some("Vegetables"));
}

// ============================================================================
// Range slider
// ============================================================================

#[test]
fn test_range_typed_input_clamps() {
    let mut slider = fieldkit::fields::RangeSlider::new("r", Range::new(0.0, 100.0, 1.0), 10.0);
    assert_eq!(slider.value(), "10px");
    assert!(slider.input("150px"));
    assert_eq!(slider.value(), "100px");
    assert!(!slider.input("abc"));
    assert_eq!(slider.number(), 100.0);
}

#[test]
fn test_range_load_switches_known_units_only() {
    let mut slider = fieldkit::fields::RangeSlider::new("r", Range::new(0.0, 10.0, 0.5), 0.0);
    slider.load("1.5em").unwrap();
    assert_eq!(slider.unit(), "em");
    assert_eq!(slider.value(), "1.5em");
    assert!(slider.load("2parsecs").is_err());
}

#[test]
fn test_range_drag_requires_grab() {
    let mut slider = fieldkit::fields::RangeSlider::new("r", Range::new(0.0, 100.0, 10.0), 0.0);
    let track = Track::new(0.0, 100.0);
    assert!(!slider.drag_to(track, 50.0));

    slider.start_drag();
    assert!(slider.drag_to(track, 24.0));
    assert_eq!(slider.number(), 20.0);
    assert!(slider.drag_to(track, 500.0));
    assert_eq!(slider.number(), 100.0);
    slider.stop_drag();

    assert!(slider.click_at(track, 61.0));
    assert_eq!(slider.number(), 60.0);
}

#[test]
fn test_range_steps_and_reset() {
    let mut slider = fieldkit::fields::RangeSlider::new("r", Range::new(0.0, 50.0, 5.0), 20.0)
        .with_default(10.0);
    assert!(slider.step_by(-3));
    assert_eq!(slider.number(), 5.0);
    assert!(slider.end());
    assert!(!slider.step_up());
    assert!(slider.reset());
    assert!(slider.is_default());
    assert_eq!(slider.default_value().as_deref(), Some("10px"));
}

#[test]
fn test_range_unit_cycle_wraps() {
    let mut slider = fieldkit::fields::RangeSlider::new("r", Range::default(), 0.0)
        .with_units(vec!["px".into(), "%".into()]);
    assert!(slider.cycle_unit(true));
    assert_eq!(slider.unit(), "%");
    assert!(slider.cycle_unit(true));
    assert_eq!(slider.unit(), "px");
    assert!(!slider.set_unit("vh"));
}

// ============================================================================
// Color picker
// ============================================================================

#[test]
fn test_color_picker_text_inputs() {
    let mut picker = ColorPicker::new("c", "#ff0000");
    assert!(picker.input_hex("00ff00"));
    assert_eq!(picker.value(), "#00ff00");

    assert!(!picker.input_hex("#0f0"));
    assert!(!picker.input_rgb("0", "0", "300"));
    assert_eq!(picker.value(), "#00ff00");

    // Non-numeric channels count as zero
    assert!(picker.input_rgb("0", "0", "abc"));
    assert_eq!(picker.value(), "#000000");

    assert!(picker.input_opacity("50"));
    assert_eq!(picker.value(), "rgba(0, 0, 0, 0.5)");
    assert!(picker.input_opacity("250"));
    assert_eq!(picker.value(), "#000000");
}

#[test]
fn test_color_picker_pointer_surfaces() {
    let mut picker = ColorPicker::new("c", "#ff0000");
    let x = Track::new(0.0, 100.0);
    let y = Track::new(0.0, 100.0);

    picker.start_hue_drag();
    assert!(picker.drag_to(x, y, 50.0, 0.0));
    assert_relative_eq!(picker.color().hue(), 180.0);

    picker.start_spectrum_drag();
    picker.drag_to(x, y, 100.0, 50.0);
    assert_relative_eq!(picker.color().saturation(), 100.0);
    assert_relative_eq!(picker.color().brightness(), 50.0);

    picker.stop_drag();
    assert!(!picker.drag_to(x, y, 0.0, 0.0));
}

#[test]
fn test_hue_drag_to_right_edge_keeps_cursor_at_end() {
    let mut picker = ColorPicker::new("c", "#3b82f6");
    let x = Track::new(0.0, 100.0);
    let y = Track::new(0.0, 100.0);

    picker.start_hue_drag();
    picker.drag_to(x, y, 100.0, 0.0);
    assert_relative_eq!(picker.hue_position(), 360.0);
    assert_relative_eq!(picker.color().hue(), 0.0);
    let at_edge = picker.value();

    // Past the edge stays put
    picker.drag_to(x, y, 140.0, 0.0);
    assert_relative_eq!(picker.hue_position(), 360.0);
    assert_eq!(picker.value(), at_edge);

    picker.drag_to(x, y, 0.0, 0.0);
    assert_relative_eq!(picker.hue_position(), 0.0);
    assert_eq!(picker.value(), at_edge);

    // Any other hue edit moves the cursor with the color
    picker.drag_to(x, y, 100.0, 0.0);
    picker.stop_drag();
    assert!(picker.set_text("#00ff00"));
    assert_relative_eq!(picker.hue_position(), 120.0);
}

#[test]
fn test_alpha_drag_needs_alpha_strip() {
    let mut picker = ColorPicker::new("c", "#ff0000");
    picker.show_alpha = false;
    picker.start_alpha_drag();
    assert!(!picker.is_dragging());
}

#[test]
fn test_color_picker_clear_and_reset() {
    let mut picker = ColorPicker::new("c", "#0000ff").with_default("#ff0000");
    assert!(picker.clear());
    assert!(picker.is_cleared());
    assert_eq!(picker.value(), "");

    assert!(picker.reset());
    assert!(!picker.is_cleared());
    assert_eq!(picker.value(), "#ff0000");
    assert!(picker.palette().contains(&"#ff0000".to_string()));
}

#[test]
fn test_color_picker_ignores_bad_text() {
    let mut picker = ColorPicker::new("c", "#00ff00");
    picker.load("notacolor").unwrap();
    assert_eq!(picker.value(), "#00ff00");

    let empty = ColorPicker::new("c", "");
    assert!(empty.is_cleared());
    assert_eq!(empty.value(), "");
}

// ============================================================================
// Button group / responsive tabs / collapsible
// ============================================================================

#[test]
fn test_button_group_moves_stop_at_ends() {
    let mut group = ButtonGroup::new("align", text_align_choices(), "left");
    assert!(!group.move_left());
    assert!(group.move_right());
    assert_eq!(group.value(), "center");
    assert!(group.select_index(3));
    assert_eq!(group.value(), "justify");
    assert!(!group.move_right());
    assert!(!group.select_index(9));
}

#[test]
fn test_responsive_tabs_cycle_and_submit_nothing() {
    let mut tabs = ResponsiveTabs::new("device");
    tabs.prev();
    assert_eq!(tabs.active(), Device::Mobile);
    tabs.next();
    assert_eq!(tabs.active(), Device::Desktop);

    tabs.load("phone").unwrap();
    assert_eq!(tabs.active(), Device::Mobile);
    assert!(tabs.load("watch").is_err());
    assert!(tabs.hidden_inputs().is_empty());
}

#[test]
fn test_collapsible_open_close_report_changes() {
    let mut section = CollapsibleSection::new("s");
    assert!(!section.open());
    assert!(section.close());
    assert_eq!(section.value(), "closed");
    assert!(!section.close());
    assert!(section.toggle());
    assert!(section.hidden_inputs().is_empty());
}

// ============================================================================
// Spacing
// ============================================================================

#[test]
fn test_linked_spacing_sets_every_side() {
    let mut spacing = SpacingBox::new("sp");
    spacing.input(SpacingTarget::Margin, BoxSide::Top, "12");
    assert_eq!(spacing.margin(), Sides::uniform(12));
    assert_eq!(spacing.padding(), Sides::default());
}

#[test]
fn test_unlinked_spacing_sets_one_side() {
    let mut spacing = SpacingBox::new("sp");
    assert!(!spacing.toggle_link());
    spacing.input(SpacingTarget::Padding, BoxSide::Left, "7abc");
    spacing.nudge(SpacingTarget::Padding, BoxSide::Top, -2);
    let padding = spacing.padding();
    assert_eq!(padding.left, 7);
    assert_eq!(padding.top, -2);
    assert_eq!(padding.right, 0);
    assert_eq!(padding.to_css("px"), "-2px 0px 0px 7px");
}

#[test]
fn test_spacing_hidden_inputs() {
    let mut spacing = SpacingBox::new("sp");
    spacing.input(SpacingTarget::Margin, BoxSide::Top, "4");
    assert!(spacing.set_unit("em"));
    assert_eq!(
        spacing.hidden_inputs(),
        vec![
            HiddenInput::new("sp_margin", r#"{"top":4,"right":4,"bottom":4,"left":4}"#),
            HiddenInput::new("sp_padding", r#"{"top":0,"right":0,"bottom":0,"left":0}"#),
            HiddenInput::new("sp_unit", "em"),
        ]
    );
}

#[test]
fn test_spacing_partial_load() {
    let mut spacing = SpacingBox::new("sp");
    spacing.input(SpacingTarget::Margin, BoxSide::Top, "3");
    spacing.load(r#"{"unit":"rem"}"#).unwrap();
    assert_eq!(spacing.unit(), "rem");
    assert_eq!(spacing.margin(), Sides::uniform(3));
    assert!(spacing.load(r#"{"unit":"vh"}"#).is_err());
    assert!(spacing.load("not json").is_err());
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_text_cursor_editing() {
    let mut text = TextInput::new("t", "héllo");
    text.home();
    text.insert('¡');
    assert_eq!(text.text(), "¡héllo");
    assert!(text.delete());
    assert_eq!(text.text(), "¡éllo");
    text.end();
    assert!(text.backspace());
    assert!(!text.delete());
    assert_eq!(text.value(), "¡éll");
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn test_animation_preview_css() {
    let mut animation = AnimationField::new("anim");
    assert!(animation.preview().is_none());

    assert!(animation.set_option(AnimationProperty::Style, "fade"));
    assert!(!animation.set_option(AnimationProperty::Style, "spin"));
    assert!(animation.set_timing(AnimationProperty::Duration, 1234.0));
    assert_eq!(animation.animation().duration, 1250);

    let preview = animation.preview().unwrap();
    assert_eq!(preview.css, "fk-anim-fade 1250ms ease 0ms 1 normal");
    assert_eq!(preview.duration_ms, Some(1350));
}

#[test]
fn test_animation_playback_ends() {
    let mut animation = AnimationField::new("anim");
    animation.set_option(AnimationProperty::Style, "bounce");
    let start = Instant::now();
    assert!(animation.play(start));
    assert!(animation.playing(start).is_some());
    assert!(animation.playing(start + Duration::from_secs(5)).is_none());

    animation.set_option(AnimationProperty::Iteration, "infinite");
    animation.play(start);
    assert!(animation.playing(start + Duration::from_secs(60)).is_some());
    animation.stop();
    assert!(animation.playing(start).is_none());
}

#[test]
fn test_animation_cycle_clamps() {
    let mut animation = AnimationField::new("anim");
    assert!(animation.cycle(AnimationProperty::Iteration, true));
    assert_eq!(animation.display(AnimationProperty::Iteration), "2");
    animation.set_timing(AnimationProperty::Delay, 3000.0);
    animation.cycle(AnimationProperty::Delay, true);
    assert_eq!(animation.display(AnimationProperty::Delay), "3000ms");
}

#[test]
fn test_animation_load_clamps_huge_timings() {
    let mut animation = AnimationField::new("anim");
    animation
        .load(r#"{"type":"fade","duration":4000000000,"delay":4294967295,"iteration":"5000000000"}"#)
        .unwrap();
    assert_eq!(animation.animation().duration, 3000);
    assert_eq!(animation.animation().delay, 3000);

    let preview = animation.preview().unwrap();
    assert_eq!(preview.duration_ms, Some(6000 * 5_000_000_000 + 100));

    animation.load(r#"{"iteration":"18446744073709551615"}"#).unwrap();
    assert_eq!(animation.preview().unwrap().duration_ms, Some(u64::MAX));
}

// ============================================================================
// Typography
// ============================================================================

#[test]
fn test_typography_responsive_rows_fall_back_to_desktop() {
    let mut typography = TypographyField::new("type");
    typography.set_device(Device::Tablet);
    assert!(typography.set(TypographyProperty::FontSize, "14px"));
    assert_eq!(typography.get(TypographyProperty::FontSize), "14px");
    assert_eq!(typography.get(TypographyProperty::LineHeight), "1.5");

    typography.set_device(Device::Desktop);
    assert_eq!(typography.get(TypographyProperty::FontSize), "16px");
    assert!(typography.value().contains(r#""fontSize":{"desktop":"16px","tablet":"14px","mobile":""}"#));
}

#[test]
fn test_typography_colors_per_state() {
    let mut typography = TypographyField::new("type");
    assert!(typography.set_color("#ff0000"));
    assert_eq!(typography.toggle_hover(), StyleState::Hover);
    assert_eq!(typography.get(TypographyProperty::Color), "");

    assert!(typography.set(TypographyProperty::Color, "#0000ff"));
    let inputs = typography.hidden_inputs();
    assert_eq!(inputs[1], HiddenInput::new("type_color", "#0000ff"));

    typography.toggle_hover();
    assert_eq!(typography.get(TypographyProperty::Color), "#ff0000");
}

#[test]
fn test_typography_load_merges() {
    let mut typography = TypographyField::new("type");
    typography.load(r#"{"fontWeight":"700"}"#).unwrap();
    assert_eq!(typography.get(TypographyProperty::FontWeight), "700");
    assert_eq!(typography.get(TypographyProperty::FontFamily), "inherit");
    assert!(typography.load("[1, 2]").is_err());
}

// ============================================================================
// Custom CSS
// ============================================================================

#[test]
fn test_custom_css_per_state_and_device() {
    let mut css = CustomCssField::new("css", Vec::new());
    assert_eq!(css.targets().len(), 2);

    css.set_css("wrapper", "color: red;");
    css.toggle_state();
    css.set_css("wrapper", "color: blue;");
    assert_eq!(css.css("wrapper"), "color: blue;");

    css.set_state(StyleState::Normal);
    assert_eq!(css.css("wrapper"), "color: red;");

    // No fallback to desktop
    css.set_device(Device::Mobile);
    assert_eq!(css.css("wrapper"), "");
}

#[test]
fn test_custom_css_editing_keeps_cursor() {
    let mut css = CustomCssField::new("css", Vec::new());
    for c in "a:b".chars() {
        css.insert(c);
    }
    css.move_left();
    css.insert_tab();
    assert_eq!(css.active_css(), "a:    b");
    assert_eq!(css.cursor(), 6);
    css.backspace();
    assert_eq!(css.active_css(), "a:   b");
}

// ============================================================================
// Tooltip / reset
// ============================================================================

#[test]
fn test_tooltip_placement() {
    let anchor = Rect::new(100.0, 100.0, 50.0, 20.0);
    let size = Size::new(40.0, 10.0);
    let viewport = Size::new(800.0, 600.0);

    let top = place_tooltip(anchor, size, viewport, Placement::Top, 8.0, 4.0);
    assert_relative_eq!(top.x, 105.0);
    assert_relative_eq!(top.y, 82.0);

    let right = place_tooltip(anchor, size, viewport, Placement::Right, 8.0, 4.0);
    assert_relative_eq!(right.x, 158.0);
    assert_relative_eq!(right.y, 105.0);

    let edge = Rect::new(0.0, 0.0, 10.0, 10.0);
    let clamped = place_tooltip(edge, size, viewport, Placement::Top, 8.0, 4.0);
    assert_relative_eq!(clamped.x, 4.0);
    assert_relative_eq!(clamped.y, 4.0);
}

#[test]
fn test_tooltip_hover_delays() {
    let mut tooltip = TooltipController::new(TooltipTiming::default());
    let start = Instant::now();
    tooltip.hover_enter(TooltipTrigger::new("f", "Help", Placement::Top), start);
    assert!(tooltip.next_deadline().is_some_and(|at| at > start));

    assert!(!tooltip.tick(start + Duration::from_millis(100)));
    assert!(tooltip.visible().is_none());
    assert!(tooltip.tick(start + Duration::from_millis(300)));
    assert_eq!(tooltip.visible().map(|t| t.text.as_str()), Some("Help"));
    assert!(tooltip.next_deadline().is_none());

    let left = start + Duration::from_secs(1);
    tooltip.hover_leave(left);
    assert!(tooltip.tick(left + Duration::from_millis(100)));
    assert!(tooltip.visible().is_none());
}

#[test]
fn test_tooltip_reentry_cancels_hide() {
    let mut tooltip = TooltipController::new(TooltipTiming::default());
    let trigger = TooltipTrigger::new("f", "Help", Placement::Bottom);
    tooltip.focus(trigger.clone());
    let now = Instant::now();
    tooltip.hover_leave(now);
    tooltip.hover_enter(trigger, now + Duration::from_millis(50));
    tooltip.tick(now + Duration::from_millis(150));
    assert!(tooltip.visible().is_some());

    tooltip.blur();
    tooltip.focus(TooltipTrigger::new("g", "", Placement::Top));
    assert!(tooltip.visible().is_none());
}

#[test]
fn test_reset_button_visibility() {
    let mut button = ResetButton::new("0px", "8px");
    assert!(button.is_visible());
    assert_eq!(button.activate(), "0px");
    button.set_current("0px");
    assert!(!button.is_visible());
}
