use crate::{
    config::BoardConfig,
    error::GridResult,
    layout::{self, Rect, RoomOrder},
    model::Talk,
    svg::{GroupTransform, SvgNode},
};

/// Number of day columns on the board.
pub const DAY_COLUMNS: usize = 2;

/// Build the whole board: background, then one column per day, earliest day on the left.
///
/// Rooms are ordered over every talk so a room keeps its column on both days. A day without
/// talks leaves its column empty.
#[tracing::instrument(skip_all, fields(talks = talks.len()))]
pub fn build_board(talks: &[Talk], config: &BoardConfig) -> GridResult<SvgNode> {
    let rooms = RoomOrder::from_talks(talks);
    let days = layout::split_days(talks, &config.time, &config.excluded_talks)?;
    if days.len() > DAY_COLUMNS {
        tracing::warn!(
            days = days.len(),
            "schedule spans more days than the board has columns; extra days are not drawn"
        );
    }
    tracing::debug!(rooms = ?rooms.rooms(), days = days.len(), "board layout");

    let mut children = vec![SvgNode::filled_rect(
        Rect::new(0.0, 0.0, config.width, config.height),
        config.background.clone(),
    )];

    let column_w = config.column_width();
    let column_h = config.column_height();
    for (idx, day) in days.iter().take(DAY_COLUMNS).enumerate() {
        let x = idx as f64 * config.width / 2.0 + config.padding;
        let nodes = draw_day(day, column_w, column_h, &rooms, config)?;
        children.push(SvgNode::group(
            GroupTransform::translate(x, config.padding),
            nodes,
        ));
    }

    Ok(SvgNode::root(config.width, config.height, children))
}

/// Nodes of one day column in local coordinates (origin at the column's top-left).
pub fn draw_day(
    day: &[&Talk],
    w: f64,
    h: f64,
    rooms: &RoomOrder,
    config: &BoardConfig,
) -> GridResult<Vec<SvgNode>> {
    let gutter = Rect::new(0.0, 0.0, config.time_gutter, h);
    let grid = Rect::new(config.time_gutter, 0.0, w - config.time_gutter, h);

    let mut out = draw_times(day, gutter, config)?;
    out.extend(draw_grid(day, grid, rooms, config)?);
    Ok(out)
}

fn draw_times(day: &[&Talk], frame: Rect, config: &BoardConfig) -> GridResult<Vec<SvgNode>> {
    let marks = layout::time_marks(day, &config.time)?;
    Ok(marks
        .iter()
        .flat_map(|mark| {
            let y = frame.y + mark.position * frame.h + config.label_offset;
            [
                SvgNode::text(frame.x, y, mark.hour_label()),
                SvgNode::text(frame.x + frame.w / 2.0, y, mark.minute_label()),
            ]
        })
        .collect())
}

// Outlines first, then titles, then avatars, so avatars are painted on top.
fn draw_grid(
    day: &[&Talk],
    frame: Rect,
    rooms: &RoomOrder,
    config: &BoardConfig,
) -> GridResult<Vec<SvgNode>> {
    let placed = layout::layout_day(day, rooms, &config.time)?;

    let mut outlines = Vec::with_capacity(placed.len());
    let mut titles = Vec::with_capacity(placed.len());
    let mut avatars = Vec::new();
    let side = config.avatar_side;
    for p in &placed {
        let r = p.rect.within(frame);
        outlines.push(SvgNode::stroked_rect(r, config.grid_stroke.clone()));
        titles.push(SvgNode::text(
            r.x,
            r.y + config.label_offset,
            p.talk.title.clone(),
        ));

        for (i, speaker) in p.talk.speakers.iter().enumerate() {
            let x = r.x + side * i as f64;
            let y = r.y + side;
            avatars.push(SvgNode::clip_path(
                speaker.id.clone(),
                SvgNode::circle(x + side / 2.0, y + side / 2.0, side / 2.0),
            ));
            avatars.push(SvgNode::image(
                Rect::new(x, y, side, side),
                speaker.photo_path.clone(),
                Some(speaker.id.clone()),
            ));
        }
    }

    outlines.extend(titles);
    outlines.extend(avatars);
    Ok(outlines)
}
