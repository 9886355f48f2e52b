use plinko_core::{BoardDimensions, BoardLayout, CellCoord, Command, Drift, Score};
use plinko_rendering::{Symbols, TerminalPresenter, TextRenderer};
use plinko_world::{self as world, query, World};

fn world_with_two_balls() -> World {
    let dimensions = BoardDimensions::new(5, 3).expect("valid dimensions");
    let layout = BoardLayout::new(dimensions, vec![0; 5]).expect("valid layout");
    let mut world = World::new(layout);
    let mut events = Vec::new();
    world::apply(&mut world, Command::SpawnBall { column: 0 }, &mut events);
    world::apply(
        &mut world,
        Command::StepBall {
            from: CellCoord::new(0, 0),
            drift: Drift::Right,
        },
        &mut events,
    );
    world::apply(&mut world, Command::SpawnBall { column: 3 }, &mut events);
    world
}

#[test]
fn renders_brick_layout_with_bars_between_cells() {
    let world = world_with_two_balls();
    let frame = TextRenderer::default().render(query::occupancy_view(&world), Score::new(30));

    assert_eq!(
        frame.rows(),
        &[
            " . . .*. ".to_owned(),
            "  .*. . . ".to_owned(),
            " . . . . ".to_owned(),
        ]
    );
    assert_eq!(
        frame.to_string(),
        " . . .*. \n  .*. . . \n . . . . \nCurrent score: 30"
    );
}

#[test]
fn custom_symbols_replace_bar_and_ball() {
    let world = world_with_two_balls();
    let renderer = TextRenderer::new(Symbols::new('|', 'o'));
    let frame = renderer.render(query::occupancy_view(&world), Score::ZERO);

    assert_eq!(frame.rows()[0], " | | |o| ");
    assert_eq!(frame.rows()[1], "  |o| | | ");
}

#[test]
fn rendering_twice_without_advancing_is_identical() {
    let world = world_with_two_balls();
    let renderer = TextRenderer::default();
    let first = renderer.render(query::occupancy_view(&world), query::score(&world));
    let second = renderer.render(query::occupancy_view(&world), query::score(&world));
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn presenter_keeps_banner_above_frames_and_reports_final_score() {
    let world = world_with_two_balls();
    let frame = TextRenderer::default().render(query::occupancy_view(&world), Score::new(7));
    let mut presenter = TerminalPresenter::new(Vec::new());

    presenter.begin("Game started").expect("write to memory");
    presenter.present(&frame).expect("write to memory");
    presenter.finish(Score::new(7)).expect("write to memory");

    let output = String::from_utf8(presenter.into_inner()).expect("utf-8 output");
    let expected = format!(
        "\x1b[2J\x1b[HGame started\n\x1b[2;1H{frame}\n\x1b[2J\x1b[HFinal score: 7\nGame ended\n"
    );
    assert_eq!(output, expected);
}
