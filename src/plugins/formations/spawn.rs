use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{Formation, FormationSlot};
use super::layout::{FormationSpec, LayoutSpec};
use crate::common::{playfield::Playfield, state::GameState};
use crate::plugins::actors::spawn_enemy;
use crate::plugins::boss::{components::BossEntry, spawn_boss};

/// What a freshly spawned formation still has to create. Removed once populated.
#[derive(Component, Debug, Clone)]
pub struct FormationRoster {
    pub spec: FormationSpec,
}

/// Spawn an empty formation above the playfield. Members follow in `SimSet::Spawn`.
pub fn spawn_formation(
    commands: &mut Commands,
    spec: &FormationSpec,
    playfield: &Playfield,
) -> Entity {
    let formation = Formation::from_spec(spec, playfield);
    let name = format!("{:?} formation", formation.kind);
    commands
        .spawn((
            Name::new(name),
            Transform::from_translation(formation.anchor.extend(0.0)),
            formation,
            FormationRoster { spec: spec.clone() },
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

pub fn populate_formations(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Formation, &FormationRoster)>,
) {
    for (e, mut formation, roster) in &mut q {
        let spec = &roster.spec;
        let anchor = formation.anchor;

        let slots = match &spec.enemy {
            Some(profile) => spec
                .layout
                .offsets()
                .into_iter()
                .map(|(offset, row)| FormationSlot {
                    entity: spawn_enemy(&mut commands, profile, anchor + offset, true),
                    origin: offset,
                    offset,
                    row,
                })
                .collect(),
            None => {
                error!("formation {e}: no enemy profile, spawning no members");
                Vec::new()
            }
        };

        let centerpiece = match &spec.layout {
            LayoutSpec::Circle { boss: Some(boss), .. } => {
                Some(spawn_boss(&mut commands, boss, anchor, BossEntry::Escorted))
            }
            _ => None,
        };

        debug!(
            "formation {e}: populated {} members{}",
            slots.len(),
            if centerpiece.is_some() { " and a boss" } else { "" }
        );
        formation.populate(slots, centerpiece);
        commands.entity(e).remove::<FormationRoster>();
    }
}
