use glam::Vec2;
use rapier2d::parry::query;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;

/// Extra distance at which two shapes still count as touching.
/// Resting contacts sit within the solver's allowed penetration, so an exact
/// intersection test would miss them.
const CONTACT_PREDICTION: f32 = 0.5;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn na_to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &Isometry<Real>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
    /// Moved only by game code. Used for transient sensors like attack hitboxes.
    KinematicPositionBased,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
            BodyType::KinematicPositionBased => RigidBodyType::KinematicPositionBased,
        }
    }
}

/// Shape description for a collider. Every body in the arena is an
/// axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    /// Rectangle from full width and height.
    pub fn rect(size: Vec2) -> Self {
        ColliderDesc::Cuboid {
            half_width: size.x / 2.0,
            half_height: size.y / 2.0,
        }
    }

    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Category/mask pair. Two colliders interact only when each one's mask
/// contains the other's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub category: u32,
    pub mask: u32,
}

impl CollisionFilter {
    pub const fn new(category: u32, mask: u32) -> Self {
        Self { category, mask }
    }

    /// Same test rapier applies to `InteractionGroups`.
    pub fn interacts_with(&self, other: &CollisionFilter) -> bool {
        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }

    fn to_rapier(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.category),
            Group::from_bits_truncate(self.mask),
        )
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::new(u32::MAX, u32::MAX)
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub gravity_scale: f32,
    pub fixed_rotation: bool,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    /// Sensors report overlaps but produce no collision response.
    pub sensor: bool,
    pub filter: CollisionFilter,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            gravity_scale: 1.0,
            fixed_rotation: true,
            collider,
            linear_damping: 0.0,
            sensor: false,
            filter: CollisionFilter::default(),
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            gravity_scale: 0.0,
            fixed_rotation: true,
            collider,
            linear_damping: 0.0,
            sensor: false,
            filter: CollisionFilter::default(),
        }
    }

    /// A body that ignores gravity and only moves when game code moves it.
    pub fn kinematic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::KinematicPositionBased,
            gravity_scale: 0.0,
            ..Self::fixed(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    /// Set the linear damping (velocity decay). Higher values slow the body faster.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Two entities whose shapes currently touch or overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
}


// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
///
/// Forces added with [`PhysicsWorld::apply_force`] last for exactly one
/// [`PhysicsWorld::step`]; the world clears them afterwards.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y points down, so positive Y gravity pulls bodies toward the floor.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data` for pair lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .linear_damping(desc.linear_damping)
            .can_sleep(false)
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .sensor(desc.sensor)
            .collision_groups(desc.filter.to_rapier())
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the simulation by `dt` seconds. Non-finite or non-positive
    /// deltas are ignored; callers clamp the upper bound.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }

    /// Every pair of entities whose colliders touch right now and whose
    /// filters allow them to interact. Computed from current poses on each
    /// call, so it also reflects bodies created since the last step.
    /// Pairs of two fixed bodies are skipped.
    pub fn contact_pairs(&self) -> Vec<CollisionPair> {
        let colliders: Vec<&Collider> = self.colliders.iter().map(|(_, c)| c).collect();
        let mut pairs = Vec::new();

        for (i, c1) in colliders.iter().enumerate() {
            for c2 in &colliders[i + 1..] {
                if !c1.collision_groups().test(c2.collision_groups()) {
                    continue;
                }
                if self.is_fixed(c1) && self.is_fixed(c2) {
                    continue;
                }
                let (Some(a), Some(b)) = (self.collider_entity(c1), self.collider_entity(c2))
                else {
                    continue;
                };
                let touching = matches!(
                    query::contact(
                        c1.position(),
                        c1.shape(),
                        c2.position(),
                        c2.shape(),
                        CONTACT_PREDICTION,
                    ),
                    Ok(Some(_))
                );
                if touching {
                    pairs.push(CollisionPair {
                        entity_a: a,
                        entity_b: b,
                    });
                }
            }
        }
        pairs
    }

    /// Apply a force for the duration of the next step only.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec2_to_na(force), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Add an instantaneous, mass-independent change of velocity.
    pub fn add_velocity(&mut self, body: &PhysicsBody, delta: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            let vel = *rb.linvel() + vec2_to_na(delta);
            rb.set_linvel(vel, true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Replace the collision mask, keeping the category.
    pub fn set_collision_mask(&mut self, body: &PhysicsBody, mask: u32) {
        if let Some(collider) = self.colliders.get_mut(body.collider_handle) {
            let mut groups = collider.collision_groups();
            groups.filter = Group::from_bits_truncate(mask);
            collider.set_collision_groups(groups);
        }
    }

    /// Current category/mask of a body's collider.
    pub fn collision_filter(&self, body: &PhysicsBody) -> Option<CollisionFilter> {
        let groups = self.colliders.get(body.collider_handle)?.collision_groups();
        Some(CollisionFilter::new(
            groups.memberships.bits(),
            groups.filter.bits(),
        ))
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- private helpers --

    fn collider_entity(&self, collider: &Collider) -> Option<EntityId> {
        let body = self.bodies.get(collider.parent()?)?;
        Some(EntityId(body.user_data as u32))
    }

    fn is_fixed(&self, collider: &Collider) -> bool {
        collider
            .parent()
            .and_then(|h| self.bodies.get(h))
            .map(|rb| rb.is_fixed())
            .unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
