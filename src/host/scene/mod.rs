//! In-memory building model implementing the host traits.
//!
//! All elements live in one [`SlotMap`] arena and reference each other by
//! [`ElementId`]. Queries and listings visit elements in insertion order,
//! independent of slot reuse after removals. Walls are boxes, ray queries use
//! a slab test per wall, and openings are plain elements carrying their size
//! parameters.

mod wall;

pub use wall::WallData;

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::error::HostError;
use crate::math::{point_at, Point3, Vector3};
use crate::model::{ConduitCategory, ConduitPath, ConduitRecord, CrossingKey, Placement, RawHit};

use super::{ObstacleQuery, OpeningHost, SizeParameters};

slotmap::new_key_type! {
    /// Unique identifier for an element in a [`Scene`].
    pub struct ElementId;
}

/// A building level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub elevation: f64,
}

/// A linked model instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkData {
    pub name: String,
}

/// A duct or pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitData {
    pub category: ConduitCategory,
    pub path: ConduitPath,
    pub diameter: f64,
}

/// A placed opening.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningData {
    /// Wall the opening is cut into.
    pub wall: ElementId,
    pub link: Option<ElementId>,
    pub level: ElementId,
    /// Conduit that caused the opening.
    pub conduit: ElementId,
    pub point: Point3,
    pub family: String,
    /// Parameter values written on creation.
    pub parameters: BTreeMap<String, f64>,
}

/// Any element stored in a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Level(LevelData),
    Link(LinkData),
    Wall(WallData),
    Conduit(ConduitData),
    Opening(OpeningData),
}

/// A 3D view ray queries can run in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View3d {
    pub name: String,
    /// View templates cannot host ray queries.
    pub is_template: bool,
}

/// A loadable opening family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningTemplate {
    pub family: String,
    /// Parameters instances of this family expose.
    pub parameters: Vec<String>,
    pub active: bool,
}

/// Index of an [`OpeningTemplate`] in its [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateHandle(usize);

#[derive(Debug)]
struct OpenUnit {
    label: String,
    created: Vec<ElementId>,
    activated: Vec<TemplateHandle>,
}

/// In-memory host model.
#[derive(Debug, Default)]
pub struct Scene {
    elements: SlotMap<ElementId, Element>,
    order: Vec<ElementId>,
    views: Vec<View3d>,
    templates: Vec<OpeningTemplate>,
    conduit_model: Option<String>,
    unit: Option<OpenUnit>,
    committed: Vec<String>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Building the model ---

    /// Names the linked model conduits are read from.
    pub fn set_conduit_model(&mut self, name: impl Into<String>) {
        self.conduit_model = Some(name.into());
    }

    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64) -> ElementId {
        self.insert(Element::Level(LevelData {
            name: name.into(),
            elevation,
        }))
    }

    pub fn add_link(&mut self, name: impl Into<String>) -> ElementId {
        self.insert(Element::Link(LinkData { name: name.into() }))
    }

    pub fn add_wall(&mut self, wall: WallData) -> ElementId {
        self.insert(Element::Wall(wall))
    }

    pub fn add_conduit(
        &mut self,
        category: ConduitCategory,
        path: ConduitPath,
        diameter: f64,
    ) -> ElementId {
        self.insert(Element::Conduit(ConduitData {
            category,
            path,
            diameter,
        }))
    }

    pub fn add_view(&mut self, name: impl Into<String>, is_template: bool) {
        self.views.push(View3d {
            name: name.into(),
            is_template,
        });
    }

    /// Loads an inactive opening family exposing `parameters`.
    pub fn add_template(&mut self, family: impl Into<String>, parameters: &[&str]) -> TemplateHandle {
        self.templates.push(OpeningTemplate {
            family: family.into(),
            parameters: parameters.iter().map(|&p| p.to_owned()).collect(),
            active: false,
        });
        TemplateHandle(self.templates.len() - 1)
    }

    /// Removes an element, returning it if it existed.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.remove(id)?;
        self.order.retain(|&e| e != id);
        Some(element)
    }

    fn insert(&mut self, element: Element) -> ElementId {
        let id = self.elements.insert(element);
        self.order.push(id);
        id
    }

    /// Iterates over all elements, oldest first.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.order
            .iter()
            .filter_map(|&id| self.elements.get(id).map(|e| (id, e)))
    }

    // --- Inspection ---

    /// Returns the element, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not in the scene.
    pub fn element(&self, id: ElementId) -> Result<&Element, HostError> {
        self.elements
            .get(id)
            .ok_or_else(|| HostError::ElementNotFound(format!("{id:?}")))
    }

    /// Returns the wall data, or an error if not found or not a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is missing or is not a wall.
    pub fn wall(&self, id: ElementId) -> Result<&WallData, HostError> {
        match self.element(id)? {
            Element::Wall(wall) => Ok(wall),
            _ => Err(HostError::WrongElementKind("wall")),
        }
    }

    /// Returns the level data, or an error if not found or not a level.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is missing or is not a level.
    pub fn level(&self, id: ElementId) -> Result<&LevelData, HostError> {
        match self.element(id)? {
            Element::Level(level) => Ok(level),
            _ => Err(HostError::WrongElementKind("level")),
        }
    }

    /// Iterates over all placed openings.
    pub fn openings(&self) -> impl Iterator<Item = (ElementId, &OpeningData)> {
        self.elements().filter_map(|(id, e)| match e {
            Element::Opening(opening) => Some((id, opening)),
            _ => None,
        })
    }

    #[must_use]
    pub fn template(&self, handle: TemplateHandle) -> Option<&OpeningTemplate> {
        self.templates.get(handle.0)
    }

    /// Labels of all committed units of work, oldest first.
    #[must_use]
    pub fn committed_units(&self) -> &[String] {
        &self.committed
    }

    fn open_unit(&mut self) -> Result<&mut OpenUnit, HostError> {
        self.unit.as_mut().ok_or(HostError::NoOpenUnit)
    }
}

impl ObstacleQuery for Scene {
    type Key = ElementId;
    type Level = ElementId;
    type Context = View3d;

    fn find_obstacle_crossings(
        &self,
        _context: &View3d,
        origin: &Point3,
        direction: &Vector3,
    ) -> Vec<RawHit<ElementId>> {
        let mut hits = Vec::new();
        for (id, element) in self.elements() {
            let Element::Wall(wall) = element else {
                continue;
            };
            for distance in wall.face_hits(origin, direction) {
                hits.push(RawHit {
                    distance,
                    obstacle: id,
                    link: wall.link,
                    point: point_at(origin, direction, distance),
                });
            }
        }
        hits
    }

    fn resolve_hosting_elevation(&self, obstacle: &CrossingKey<ElementId>) -> Option<ElementId> {
        let wall = self.wall(obstacle.obstacle).ok()?;
        if wall.link != obstacle.link {
            return None;
        }
        self.level(wall.level).ok().map(|_| wall.level)
    }
}

impl OpeningHost for Scene {
    type Source = String;
    type Template = TemplateHandle;
    type Opening = ElementId;

    fn conduit_source(&self) -> Option<String> {
        self.conduit_model.clone()
    }

    fn list_linear_conduits(
        &self,
        _source: &String,
        category: ConduitCategory,
    ) -> Vec<ConduitRecord<ElementId>> {
        self.elements()
            .filter_map(|(id, e)| match e {
                Element::Conduit(c) if c.category == category => Some(ConduitRecord {
                    id,
                    category,
                    path: c.path.clone(),
                    diameter: c.diameter,
                }),
                _ => None,
            })
            .collect()
    }

    fn active_spatial_context(&self) -> Option<View3d> {
        self.views.iter().find(|v| !v.is_template).cloned()
    }

    fn opening_template(&self, family: &str) -> Option<TemplateHandle> {
        self.templates
            .iter()
            .position(|t| t.family == family)
            .map(TemplateHandle)
    }

    fn is_template_active(&self, template: &TemplateHandle) -> bool {
        self.template(*template).is_some_and(|t| t.active)
    }

    fn activate_template(&mut self, template: &TemplateHandle) -> Result<(), HostError> {
        let handle = *template;
        self.open_unit()?;
        let entry = self
            .templates
            .get_mut(handle.0)
            .ok_or_else(|| HostError::ElementNotFound(format!("{handle:?}")))?;
        if !entry.active {
            entry.active = true;
            self.open_unit()?.activated.push(handle);
        }
        Ok(())
    }

    fn materialize_opening(
        &mut self,
        template: &TemplateHandle,
        placement: &Placement<ElementId, ElementId>,
        size: SizeParameters<'_>,
    ) -> Result<ElementId, HostError> {
        self.open_unit()?;
        let family = {
            let entry = self
                .template(*template)
                .ok_or_else(|| HostError::ElementNotFound(format!("{template:?}")))?;
            if !entry.active {
                return Err(HostError::Rejected(format!(
                    "family \"{}\" is not active",
                    entry.family
                )));
            }
            for name in [size.width, size.height] {
                if !entry.parameters.iter().any(|p| p == name) {
                    return Err(HostError::ParameterNotFound(name.to_owned()));
                }
            }
            entry.family.clone()
        };
        self.wall(placement.obstacle)?;
        self.level(placement.level)?;

        let mut parameters = BTreeMap::new();
        parameters.insert(size.width.to_owned(), placement.width);
        parameters.insert(size.height.to_owned(), placement.height);

        let id = self.insert(Element::Opening(OpeningData {
            wall: placement.obstacle,
            link: placement.link,
            level: placement.level,
            conduit: placement.conduit,
            point: placement.point,
            family,
            parameters,
        }));
        self.open_unit()?.created.push(id);
        Ok(id)
    }

    fn begin_unit(&mut self, label: &str) -> Result<(), HostError> {
        if let Some(unit) = &self.unit {
            return Err(HostError::UnitAlreadyOpen(unit.label.clone()));
        }
        self.unit = Some(OpenUnit {
            label: label.to_owned(),
            created: Vec::new(),
            activated: Vec::new(),
        });
        Ok(())
    }

    fn commit_unit(&mut self) -> Result<(), HostError> {
        let unit = self.unit.take().ok_or(HostError::NoOpenUnit)?;
        self.committed.push(unit.label);
        Ok(())
    }

    fn rollback_unit(&mut self) -> Result<(), HostError> {
        let unit = self.unit.take().ok_or(HostError::NoOpenUnit)?;
        for id in unit.created {
            self.remove(id);
        }
        for handle in unit.activated {
            if let Some(entry) = self.templates.get_mut(handle.0) {
                entry.active = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::IntersectionOracle;

    fn scene_with_wall() -> (Scene, ElementId, ElementId) {
        let mut scene = Scene::new();
        let level = scene.add_level("Level 1", 0.0);
        let wall = scene.add_wall(
            WallData::new(
                Point3::new(3.0, -5.0, 0.0),
                Point3::new(3.0, 5.0, 0.0),
                0.2,
                3.0,
                level,
            )
            .unwrap(),
        );
        scene.add_view("{3D}", false);
        (scene, wall, level)
    }

    #[test]
    fn ray_reports_both_faces_of_one_wall() {
        let (scene, wall, _) = scene_with_wall();
        let view = scene.active_spatial_context().unwrap();
        let oracle = IntersectionOracle::new(&scene, &view);
        let hits = oracle.query(&Point3::new(0.0, 0.0, 1.0), &Vector3::x());
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.obstacle == wall && h.link.is_none()));
        assert!((hits[0].point - Point3::new(2.9, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn view_templates_are_not_contexts() {
        let mut scene = Scene::new();
        scene.add_view("template", true);
        assert!(scene.active_spatial_context().is_none());
        scene.add_view("{3D}", false);
        assert_eq!(scene.active_spatial_context().unwrap().name, "{3D}");
    }

    #[test]
    fn level_resolution() {
        let (mut scene, wall, level) = scene_with_wall();
        let key = CrossingKey { obstacle: wall, link: None };
        assert_eq!(scene.resolve_hosting_elevation(&key), Some(level));

        let wrong_link = CrossingKey { obstacle: wall, link: Some(level) };
        assert_eq!(scene.resolve_hosting_elevation(&wrong_link), None);

        scene.remove(level);
        assert_eq!(scene.resolve_hosting_elevation(&key), None);
    }

    #[test]
    fn materialize_requires_open_unit() {
        let (mut scene, wall, level) = scene_with_wall();
        let template = scene.add_template("Opening", &["Width", "Height"]);
        let placement = Placement {
            conduit: wall,
            category: ConduitCategory::Duct,
            obstacle: wall,
            link: None,
            point: Point3::new(2.9, 0.0, 1.0),
            level,
            width: 0.3,
            height: 0.3,
        };
        let size = SizeParameters { width: "Width", height: "Height" };

        let err = scene.materialize_opening(&template, &placement, size).unwrap_err();
        assert_eq!(err, HostError::NoOpenUnit);

        scene.begin_unit("activate").unwrap();
        scene.activate_template(&template).unwrap();
        scene.commit_unit().unwrap();

        scene.begin_unit("place").unwrap();
        let id = scene.materialize_opening(&template, &placement, size).unwrap();
        scene.commit_unit().unwrap();

        let (_, opening) = scene.openings().find(|(oid, _)| *oid == id).unwrap();
        assert_eq!(opening.parameters.get("Width"), Some(&0.3));
        assert_eq!(opening.parameters.get("Height"), Some(&0.3));
        assert_eq!(scene.committed_units(), ["activate", "place"]);
    }

    #[test]
    fn missing_parameter_is_reported() {
        let (mut scene, wall, level) = scene_with_wall();
        let template = scene.add_template("Opening", &["Width"]);
        let placement = Placement {
            conduit: wall,
            category: ConduitCategory::Pipe,
            obstacle: wall,
            link: None,
            point: Point3::origin(),
            level,
            width: 0.1,
            height: 0.1,
        };
        scene.begin_unit("place").unwrap();
        scene.activate_template(&template).unwrap();
        let err = scene
            .materialize_opening(&template, &placement, SizeParameters { width: "Width", height: "Height" })
            .unwrap_err();
        assert_eq!(err, HostError::ParameterNotFound("Height".to_owned()));
    }

    #[test]
    fn rollback_removes_openings_and_activation() {
        let (mut scene, wall, level) = scene_with_wall();
        let template = scene.add_template("Opening", &["Width", "Height"]);
        let placement = Placement {
            conduit: wall,
            category: ConduitCategory::Duct,
            obstacle: wall,
            link: None,
            point: Point3::origin(),
            level,
            width: 0.2,
            height: 0.2,
        };
        scene.begin_unit("place").unwrap();
        scene.activate_template(&template).unwrap();
        scene
            .materialize_opening(&template, &placement, SizeParameters { width: "Width", height: "Height" })
            .unwrap();
        assert_eq!(scene.openings().count(), 1);

        scene.rollback_unit().unwrap();
        assert_eq!(scene.openings().count(), 0);
        assert!(!scene.is_template_active(&template));
        assert!(scene.committed_units().is_empty());
    }

    #[test]
    fn walls_are_visited_in_insertion_order_after_removal() {
        let mut scene = Scene::new();
        let level = scene.add_level("Level 1", 0.0);
        let wall_at = |x: f64| {
            WallData::new(Point3::new(x, -5.0, 0.0), Point3::new(x, 5.0, 0.0), 0.2, 3.0, level)
                .unwrap()
        };
        let first = scene.add_wall(wall_at(2.0));
        let second = scene.add_wall(wall_at(4.0));
        scene.remove(first);
        // Reuses the freed slot, but was added last.
        let third = scene.add_wall(wall_at(6.0));
        scene.add_view("{3D}", false);

        let view = scene.active_spatial_context().unwrap();
        let oracle = IntersectionOracle::new(&scene, &view);
        let hits = oracle.query(&Point3::new(0.0, 0.0, 1.0), &Vector3::x());
        let order: Vec<ElementId> = hits.iter().map(|h| h.obstacle).collect();
        assert_eq!(order, vec![second, second, third, third]);
    }

    #[test]
    fn levels_and_links_keep_their_data() {
        let mut scene = Scene::new();
        let level = scene.add_level("Level 2", 3.2);
        let link = scene.add_link("Architecture");

        let data = scene.level(level).unwrap();
        assert_eq!(data.name, "Level 2");
        assert!((data.elevation - 3.2).abs() < f64::EPSILON);
        match scene.element(link).unwrap() {
            Element::Link(data) => assert_eq!(data.name, "Architecture"),
            other => panic!("expected Link, got {other:?}"),
        }
        assert_eq!(scene.level(link).unwrap_err(), HostError::WrongElementKind("level"));
    }

    #[test]
    fn nested_units_rejected() {
        let mut scene = Scene::new();
        scene.begin_unit("a").unwrap();
        assert_eq!(
            scene.begin_unit("b").unwrap_err(),
            HostError::UnitAlreadyOpen("a".to_owned())
        );
        assert_eq!(Scene::new().commit_unit().unwrap_err(), HostError::NoOpenUnit);
    }
}
