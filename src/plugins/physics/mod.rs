//! Physics plugin: avian is only used as a trigger/contact detector.
//!
//! Every gameplay body is a sensor. There is no gravity and nothing responds to contacts
//! physically; `CollisionStart` messages feed the combat pipeline instead.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let length_unit = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(length_unit))
        .insert_resource(Gravity::ZERO);
}
