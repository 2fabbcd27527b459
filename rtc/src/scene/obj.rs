//! Wavefront OBJ loader covering the subset used by scene files: `v`, `vn`,
//! `f` (with `a/b/c` vertex syntax and fan triangulation of polygons) and
//! `g` named groups. Anything else is counted and skipped.

use std::{
    collections::HashMap,
    path::Path,
};

use anyhow::{bail, Context};

use crate::{
    object::Object,
    tuple::{Point, Tuple, Vector},
};

type Error = anyhow::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
struct FaceVertex {
    vertex: usize,
    normal: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Face {
    vertices: Vec<FaceVertex>,
    group: Option<String>,
}

#[derive(Debug)]
struct Data {
    ignored: usize,
    vertices: Vec<Point>,
    normals: Vec<Vector>,
    faces: Vec<Face>,
}

impl Data {
    /// Rescales and recenters the vertices into the unit cube, so models
    /// of arbitrary scale can be dropped into a scene.
    fn normalize(mut self) -> Self {
        let (min, max) = self.extent();

        let sx = max.x() - min.x();
        let sy = max.y() - min.y();
        let sz = max.z() - min.z();

        let scale = sx.max(sy.max(sz)) / 2.0;

        for vertex in &mut self.vertices {
            *vertex = Point::new(
                (vertex.x() - (min.x() + sx / 2.0)) / scale,
                (vertex.y() - (min.y() + sy / 2.0)) / scale,
                (vertex.z() - (min.z() + sz / 2.0)) / scale,
            );
        }

        self
    }

    fn extent(&self) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

        for vertex in &self.vertices {
            min = Point::new(
                min.x().min(vertex.x()),
                min.y().min(vertex.y()),
                min.z().min(vertex.z()),
            );
            max = Point::new(
                max.x().max(vertex.x()),
                max.y().max(vertex.y()),
                max.z().max(vertex.z()),
            );
        }

        (min, max)
    }
}

impl Default for Data {
    fn default() -> Self {
        Self {
            ignored: 0,
            // Indices are 1-based, slot 0 is a placeholder.
            vertices: vec![Point::zero()],
            normals: vec![Vector::zero()],
            faces: vec![],
        }
    }
}

fn parse_triple(fields: &[&str], line: &str, line_number: usize, kind: &str) -> Result<[f64; 3], Error> {
    if fields.len() != 4 {
        bail!("Invalid {} `{}` at line {}", kind, line.trim(), line_number);
    }

    let mut xyz = [0.0; 3];
    for (value, field) in xyz.iter_mut().zip(fields.iter().skip(1)) {
        *value = field.parse::<f64>().map_err(|_| {
            anyhow::anyhow!("Invalid {} `{}` at line {}", kind, line.trim(), line_number)
        })?;
    }

    Ok(xyz)
}

fn parse_face(
    fields: &[&str],
    line: &str,
    line_number: usize,
    data: &Data,
    current_group: &Option<String>,
) -> Result<Face, Error> {
    let invalid = || anyhow::anyhow!("Invalid face `{}` at line {}", line.trim(), line_number);

    if fields.len() < 4 {
        return Err(invalid());
    }

    let mut face = Face {
        vertices: vec![],
        group: current_group.clone(),
    };

    for field in fields.iter().skip(1) {
        let (vertex, normal) = match field.parse::<usize>() {
            Ok(index) => (index, None),
            Err(_) => {
                let parts = field.split('/').collect::<Vec<&str>>();
                if parts.len() != 3 {
                    return Err(invalid());
                }

                let vertex = parts[0].parse::<usize>().map_err(|_| invalid())?;
                let normal = parts[2].parse::<usize>().ok();

                (vertex, normal)
            }
        };

        if vertex == 0 || vertex >= data.vertices.len() {
            return Err(invalid());
        }
        if let Some(normal) = normal {
            if normal == 0 || normal >= data.normals.len() {
                return Err(invalid());
            }
        }

        face.vertices.push(FaceVertex { vertex, normal });
    }

    Ok(face)
}

fn parse_data(s: &str) -> Result<Data, Error> {
    let mut data = Data::default();
    let mut current_group = None;

    for (index, line) in s.lines().enumerate() {
        let line_number = index + 1;
        let fields = line.split_whitespace().collect::<Vec<&str>>();

        match fields.first() {
            Some(&"g") => {
                if fields.len() != 2 {
                    bail!("Invalid group `{}` at line {}", line.trim(), line_number);
                }
                current_group = Some(fields[1].to_string());
            }
            Some(&"v") => {
                let [x, y, z] = parse_triple(&fields, line, line_number, "vertex")?;
                data.vertices.push(Point::new(x, y, z));
            }
            Some(&"vn") => {
                let [x, y, z] = parse_triple(&fields, line, line_number, "normal")?;
                data.normals.push(Vector::new(x, y, z));
            }
            Some(&"f") => {
                let face = parse_face(&fields, line, line_number, &data, &current_group)?;
                data.faces.push(face);
            }
            _ => data.ignored += 1,
        }
    }

    Ok(data)
}

fn mk_triangles(face: &Face, vertices: &[Point], normals: &[Vector]) -> Vec<Object> {
    let mut triangles = Vec::with_capacity(face.vertices.len());

    for i in 1..face.vertices.len() - 1 {
        let (a, b, c) = (face.vertices[0], face.vertices[i], face.vertices[i + 1]);

        // A face without a full set of normals falls back to flat shading.
        match (a.normal, b.normal, c.normal) {
            (Some(na), Some(nb), Some(nc)) => triangles.push(Object::new_smooth_triangle(
                vertices[a.vertex],
                vertices[b.vertex],
                vertices[c.vertex],
                normals[na],
                normals[nb],
                normals[nc],
            )),
            _ => triangles.push(Object::new_triangle(
                vertices[a.vertex],
                vertices[b.vertex],
                vertices[c.vertex],
            )),
        }
    }

    triangles
}

pub fn parse_str(s: &str, normalize: bool) -> Result<Object, Error> {
    let data = parse_data(s)?;
    let data = if normalize { data.normalize() } else { data };

    let mut anonymous = vec![];
    let mut named: HashMap<String, Vec<Object>> = HashMap::new();

    for face in &data.faces {
        let triangles = mk_triangles(face, &data.vertices, &data.normals);
        let group = Object::new_group(triangles);

        match &face.group {
            None => anonymous.push(group),
            Some(name) => named.entry(name.clone()).or_default().push(group),
        }
    }

    let anonymous_group = Object::new_group(anonymous);

    if named.is_empty() {
        Ok(anonymous_group)
    } else {
        let mut groups = Vec::with_capacity(named.len() + 1);
        groups.push(anonymous_group);
        for (_, triangles) in named {
            groups.push(Object::new_group(triangles));
        }

        Ok(Object::new_group(groups))
    }
}

pub fn parse_file(path: impl AsRef<Path>, normalize: bool) -> Result<Object, Error> {
    let path = path.as_ref();
    let string = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_str(&string, normalize)
        .with_context(|| format!("failed to parse {}", path.display()))
}
