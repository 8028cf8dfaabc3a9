use super::*;

fn key(frame: f64, selector: &str, action: InteractionAction) -> CursorKeyframe {
    CursorKeyframe {
        frame,
        target: Some(selector.to_owned()),
        target_offset: None,
        x: None,
        y: None,
        interaction: Some(Interaction {
            selector: selector.to_owned(),
            action,
            value: None,
            hold_duration: None,
            speed: None,
        }),
    }
}

#[test]
fn hover_and_click_use_hold_defaults() {
    let tl = InteractionTimeline::build(&[
        key(10.0, "#a", InteractionAction::Hover),
        key(40.0, "#b", InteractionAction::Click),
    ]);
    let w = tl.windows();
    assert_eq!((w[0].start, w[0].end), (10.0, 30.0));
    assert_eq!((w[1].start, w[1].end), (40.0, 50.0));
    assert!(w[0].contains(29.0) && !w[0].contains(30.0));
}

#[test]
fn explicit_hold_overrides_default() {
    let mut k = key(0.0, "#a", InteractionAction::Click);
    if let Some(ix) = k.interaction.as_mut() {
        ix.hold_duration = Some(4.0);
    }
    let tl = InteractionTimeline::build(&[k]);
    assert_eq!(tl.windows()[0].end, 4.0);
}

#[test]
fn focus_latches_until_other_selector() {
    let tl = InteractionTimeline::build(&[
        key(0.0, "#name", InteractionAction::Focus),
        key(10.0, "#name", InteractionAction::Type),
        key(50.0, "#email", InteractionAction::Focus),
    ]);
    let w = tl.windows();
    assert_eq!(w[0].end, 50.0);
    assert_eq!(w[1].end, f64::INFINITY);
    assert_eq!(w[2].end, f64::INFINITY);

    assert_eq!(tl.active_at(49.0).count(), 2);
    let at_50: Vec<_> = tl
        .active_at(50.0)
        .map(|w| w.interaction.selector.as_str())
        .collect();
    assert_eq!(at_50, vec!["#name", "#email"]);
}

#[test]
fn keyframes_are_ordered_and_filtered() {
    let mut plain = key(5.0, "#x", InteractionAction::Hover);
    plain.interaction = None;
    let tl = InteractionTimeline::build(&[
        key(30.0, "#late", InteractionAction::Check),
        plain,
        key(f64::NAN, "#bad", InteractionAction::Hover),
        key(10.0, "#early", InteractionAction::Select),
    ]);
    let selectors: Vec<_> = tl
        .windows()
        .iter()
        .map(|w| w.interaction.selector.as_str())
        .collect();
    assert_eq!(selectors, vec!["#early", "#late"]);
    assert!(InteractionTimeline::build(&[]).is_empty());
}
