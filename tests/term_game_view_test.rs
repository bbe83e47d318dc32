use blockfall::core::GameState;
use blockfall::term::{piece_color, AnchorY, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind, Point, VISIBLE_ROWS};

#[test]
fn term_view_renders_border_corners() {
    let state = GameState::new(1);
    let snap = state.snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // field = 10*2 by 18*1 => 20x18, plus border => 22x20
    let vp = Viewport::new(22, 20);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 19).unwrap().ch, '└');
    assert_eq!(fb.get(21, 19).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[VISIBLE_ROWS - 1][0] = PieceKind::I.index() as u8 + 1;

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 20));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + (VISIBLE_ROWS as u16 - 1);
    for x in [1, 2] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::I));
    }
}

#[test]
fn term_view_tracks_the_falling_piece() {
    let mut state = GameState::new(42);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(60, 24);

    // Fall until every cell is inside the field.
    state.apply_action(GameAction::SoftDropPressed);
    while state.piece().cells().iter().any(|c| c.y < 0) {
        state.tick();
    }

    let snap = state.snapshot();
    let fb = view.render(&snap, vp);
    let layout = view.layout(vp);
    let color = piece_color(snap.active.kind);

    for &Point { x, y } in snap.active.cells.iter() {
        let col = ((x - 150) / 30) as u16;
        let row = y.div_euclid(30) as u16;
        let (px, py) = view.cell_origin(layout, col, row);
        assert_eq!(fb.get(px, py).unwrap().style.fg, color);
    }
}

#[test]
fn term_view_shows_pause_overlay() {
    let mut state = GameState::new(1);
    state.apply_action(GameAction::Pause);

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(60, 24);
    let fb = view.render(&state.snapshot(), vp);
    let layout = view.layout(vp);

    assert!(fb
        .row_text(layout.frame_y + layout.frame_h / 2)
        .contains("PAUSED"));
}
