use std::fmt::Write;

use engine::{prelude::*, Filter, VisibilityInfo};

/// Stand-in for a human player: arm yourself with whatever is underfoot, hit
/// whatever is next to you, otherwise wait for them to come.
pub fn choose_action(area: &Area, player: &Entity) -> PlayerAction {
    let Some(pos) = player.loc(area) else {
        return PlayerAction::Wait;
    };

    if player.wielded(area).is_none() {
        if let Some(weapon) = player
            .inventory(area)
            .into_iter()
            .find(|e| e.weapon(area).is_some())
        {
            return PlayerAction::Wield(weapon);
        }
    }

    if !area.entities_at(pos, Filter::only(Kind::Item)).is_empty() {
        return PlayerAction::PickUp;
    }

    for dir in DIR_8 {
        if !area
            .entities_at(pos + dir, Filter::only(Kind::Monster))
            .is_empty()
        {
            return PlayerAction::Step(dir);
        }
    }
    PlayerAction::Wait
}

fn cell_char(info: &VisibilityInfo) -> char {
    if info.never_seen() {
        return ' ';
    }

    let remembered = info
        .remembered_monsters
        .first()
        .or(info.remembered_items.first())
        .or(info.remembered_doodads.first());
    match remembered {
        Some(g) => g.icon,
        None if info.visible() => '.',
        None => ',',
    }
}

/// Draw the area the way the player remembers it.
pub fn render(area: &Area) -> String {
    let mut ret = String::new();
    let player_pos = area.player().and_then(|p| p.loc(area));

    for y in 0..area.height() {
        for x in 0..area.width() {
            let pos = ivec2(x, y);
            let c = if Some(pos) == player_pos {
                '@'
            } else {
                area.visibility_matrix().get(pos).map_or(' ', cell_char)
            };
            ret.push(c);
        }
        let _ = writeln!(ret);
    }
    ret
}
