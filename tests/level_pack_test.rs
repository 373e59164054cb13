//! Tests for level-pack loading and the puzzle typestate.

use strictly_linepaint::{
    Coordinate, Direction, Edge, LevelCatalog, LevelDefinition, LevelError, PuzzleInProgress,
    PuzzleResult, PuzzleSetup, VerticalAxis, is_complete,
};

fn edge(a: (i32, i32), b: (i32, i32)) -> Edge {
    Edge::new(a.into(), b.into()).expect("adjacent")
}

#[test]
fn test_bundled_pack_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/levels.toml");
    let catalog = LevelCatalog::from_file(path).expect("bundled pack loads");
    assert!(!catalog.is_empty());
    for level in catalog.levels() {
        assert!(!level.target().is_empty());
        assert!(level.is_winnable());
    }
}

#[test]
fn test_file_formats() {
    let dir = tempfile::tempdir().expect("temp dir");

    let json = dir.path().join("pack.json");
    std::fs::write(
        &json,
        r#"{"levels":[{"width":2,"height":1,"brush_start":[0,0],"target":[[[0,0],[1,0]]]}]}"#,
    )
    .unwrap();
    assert_eq!(LevelCatalog::from_file(&json).unwrap().len(), 1);

    let yaml = dir.path().join("pack.yaml");
    std::fs::write(&yaml, "levels: []").unwrap();
    assert!(matches!(
        LevelCatalog::from_file(&yaml),
        Err(LevelError::UnsupportedFormat(_))
    ));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        LevelCatalog::from_file(&missing),
        Err(LevelError::Io { .. })
    ));
}

#[test]
fn test_bad_level_reports_index() {
    let pack = r#"
[[levels]]
width = 2
height = 1
brush_start = [0, 0]
target = [[[0, 0], [1, 0]]]

[[levels]]
width = 2
height = 1
brush_start = [5, 0]
target = [[[0, 0], [1, 0]]]
"#;
    let err = LevelCatalog::from_toml_str(pack).unwrap_err();
    assert!(matches!(err, LevelError::InLevel { index: 1, .. }));
    assert!(err.to_string().contains("Level 1"));
}

#[test]
fn test_target_direction_is_irrelevant() {
    let level = LevelDefinition::new(
        3,
        3,
        Coordinate::new(1, 1),
        vec![edge((1, 0), (1, 1)), edge((0, 0), (1, 0))],
    )
    .unwrap();
    let setup = PuzzleSetup::new(level, 1.0, VerticalAxis::YDown).unwrap();

    match PuzzleInProgress::replay(setup, &[Direction::Up, Direction::Left]) {
        PuzzleResult::Solved(puzzle) => {
            assert_eq!(puzzle.brush().position(), Coordinate::new(0, 0));
        }
        PuzzleResult::InProgress(_) => panic!("Reversed strokes should still solve"),
    }
}

#[test]
fn test_y_up_axis_flips_vertical_swipes() {
    let level = LevelDefinition::new(2, 2, Coordinate::new(0, 0), vec![edge((0, 0), (0, 1))])
        .unwrap();
    let setup = PuzzleSetup::new(level, 1.0, VerticalAxis::YUp).unwrap();

    let blocked = setup.clone().start().swipe(Direction::Down);
    assert!(blocked.outcome().is_blocked());

    let solved = setup.start().swipe(Direction::Up);
    assert!(solved.is_solved());
}

#[test]
fn test_win_requires_exact_match() {
    let target = [edge((0, 0), (1, 0)), edge((1, 0), (1, 1))];
    let level = LevelDefinition::new(3, 3, Coordinate::new(0, 0), target.to_vec()).unwrap();
    let setup = PuzzleSetup::new(level, 1.0, VerticalAxis::YDown).unwrap();

    match PuzzleInProgress::replay(setup, &[Direction::Right]) {
        PuzzleResult::InProgress(puzzle) => {
            assert!(!is_complete(puzzle.ledger(), &target));
            assert_eq!(puzzle.missing(), vec![target[1]]);
        }
        PuzzleResult::Solved(_) => panic!("Subset must not solve"),
    }
}
