use story_rs::StoryError;
use story_rs::interaction::{NavigationControls, Navigator};

fn story_navigator() -> Navigator {
    Navigator::new(3, Some(1)).expect("navigator")
}

#[test]
fn advance_and_retreat_saturate_at_the_ends() {
    let mut navigator = story_navigator();
    assert!(!navigator.retreat());
    assert_eq!(navigator.state().scene_index(), 0);

    assert!(navigator.advance());
    assert!(navigator.advance());
    assert!(!navigator.advance());
    assert_eq!(navigator.state().scene_index(), 2);

    assert!(navigator.retreat());
    assert!(navigator.retreat());
    assert!(!navigator.retreat());
    assert_eq!(navigator.state().scene_index(), 0);
}

#[test]
fn select_year_sets_parameter_and_advances_atomically() {
    let mut navigator = story_navigator();
    navigator.advance();
    navigator.select_year(2016).expect("picker scene");

    let state = navigator.state();
    assert_eq!(state.scene_index(), 2);
    assert_eq!(state.selected_year(), Some(2016));
}

#[test]
fn select_year_outside_picker_is_rejected_without_side_effects() {
    let mut navigator = story_navigator();
    let err = navigator.select_year(2016).expect_err("scene 0 is not the picker");
    assert!(matches!(
        err,
        StoryError::YearSelectionUnavailable { scene_index: 0 }
    ));
    assert_eq!(navigator.state().selected_year(), None);
    assert_eq!(navigator.state().scene_index(), 0);

    navigator.advance();
    navigator.select_year(2018).expect("picker scene");
    assert!(navigator.select_year(2019).is_err());
    assert_eq!(navigator.state().selected_year(), Some(2018));
}

#[test]
fn selected_year_survives_back_navigation_and_last_click_wins() {
    let mut navigator = story_navigator();
    navigator.advance();
    navigator.select_year(2016).expect("first click");

    navigator.retreat();
    assert_eq!(navigator.state().scene_index(), 1);
    assert_eq!(navigator.state().selected_year(), Some(2016));

    navigator.retreat();
    navigator.advance();
    navigator.advance();
    assert_eq!(navigator.state().scene_index(), 2);
    assert_eq!(navigator.state().selected_year(), Some(2016));

    navigator.retreat();
    navigator.select_year(2019).expect("second click");
    assert_eq!(navigator.state().selected_year(), Some(2019));
}

#[test]
fn controls_follow_scene_position() {
    let mut navigator = story_navigator();
    assert_eq!(
        navigator.controls(),
        NavigationControls {
            previous_enabled: false,
            next_visible: true
        }
    );

    navigator.advance();
    assert_eq!(
        navigator.controls(),
        NavigationControls {
            previous_enabled: true,
            next_visible: false
        }
    );

    navigator.select_year(2020).expect("picker scene");
    assert_eq!(
        navigator.controls(),
        NavigationControls {
            previous_enabled: true,
            next_visible: false
        }
    );
}

#[test]
fn story_without_picker_only_hides_next_on_last_scene() {
    let mut navigator = Navigator::new(2, None).expect("navigator");
    assert!(navigator.controls().next_visible);
    navigator.advance();
    assert!(!navigator.controls().next_visible);
    assert!(navigator.select_year(2010).is_err());
}
