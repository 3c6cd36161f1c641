use crate::consts;
use crate::game::{Coordinate, FoodKind, GameState, Grid, Snapshot};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
};

impl Widget for &Snapshot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(
            format!(
                " Score: {}  Best: {}",
                self.score,
                self.highscore.unwrap_or_default()
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let side = u16::try_from(self.grid.cells_per_side()).unwrap_or(u16::MAX);
        let block_area = center_rect(
            board_area,
            Size {
                width: side.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
                height: side.saturating_add(2),
            },
        );
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            grid: self.grid,
            buf,
        };
        if let Some(pos) = self.food.position {
            match self.food.kind {
                FoodKind::Plain => {
                    canvas.draw_cell(pos, consts::PLAIN_FOOD_SYMBOL, consts::PLAIN_FOOD_STYLE);
                }
                FoodKind::Bonus => {
                    canvas.draw_cell(pos, consts::BONUS_FOOD_SYMBOL, consts::BONUS_FOOD_STYLE);
                }
            }
        }
        for &pos in self.segments.iter().skip(1) {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(head) = self.head() {
            canvas.draw_cell(head, consts::SNAKE_HEAD_SYMBOL, consts::SNAKE_HEAD_STYLE);
        }

        let (msg1, msg2) = match self.state {
            GameState::NewGame => (
                String::from(" Press Enter or Space to play"),
                String::from(" Quit: q"),
            ),
            GameState::Running => (String::new(), String::from(" Move: arrows/wasd/hjkl  Quit: q")),
            GameState::GameOver => (
                format!(
                    " GAME OVER -- score: {}",
                    self.reached_score.unwrap_or_default()
                ),
                format!(
                    " Highscore: {} -- Enter to play again",
                    self.highscore.unwrap_or_default()
                ),
            ),
        };
        Line::from(msg1).render(msg1_area, buf);
        Line::from(msg2).render(msg2_area, buf);
    }
}

/// The inside of the board, addressed in grid coordinates
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    grid: Grid,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Coordinate, glyph: &str, style: Style) {
        let (col, row) = self.grid.cell_of(pos);
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row).filter(|&y| y < self.area.bottom()) else {
            return;
        };
        let Some(x0) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        for (ch, dx) in glyph.chars().zip(0u16..) {
            let Some(x) = x0.checked_add(dx).filter(|&x| x < self.area.right()) else {
                return;
            };
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}
