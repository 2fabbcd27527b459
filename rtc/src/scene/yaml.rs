use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context};
use serde_yaml::Value;

use crate::{
    camera::Camera,
    color::Color,
    light::Light,
    material::Material,
    object::Object,
    pattern::Pattern,
    scene::{obj, Scene},
    transform::{
        rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform,
        Transform,
    },
    tuple::{Point, Tuple, Vector},
    world::World,
};

type Error = anyhow::Error;

/// Loads the book's YAML scene format: a top-level sequence of `add` and
/// `define` entries. Defines hold named materials or transform lists and
/// support `extend` for material inheritance.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Scene, Error> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    parse_str(&text, &base_dir).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_str(text: &str, base_dir: impl AsRef<Path>) -> Result<Scene, Error> {
    let doc: Value = serde_yaml::from_str(text).context("invalid YAML")?;
    let entries = doc
        .as_sequence()
        .ok_or_else(|| anyhow!("expected a top-level sequence of scene entries"))?;

    let loader = Loader::new(entries, base_dir.as_ref().to_path_buf())?;

    let mut objects = vec![];
    let mut lights = vec![];
    let mut camera = None;

    for entry in entries {
        let Some(added) = entry.get("add") else {
            continue;
        };
        let kind = added
            .as_str()
            .ok_or_else(|| anyhow!("`add` expects a string, got {added:?}"))?;

        match kind {
            "camera" => camera = Some(mk_camera(entry)?),
            "light" => lights.push(mk_light(entry)?),
            "sphere" | "plane" | "cube" | "cylinder" | "cone" => {
                objects.push(loader.mk_object(entry, kind)?)
            }
            "obj" => objects.push(loader.mk_obj_file(entry)?),
            other => bail!("unknown scene entry `{other}`"),
        }
    }

    Ok(Scene {
        world: World::new().with_objects(objects).with_lights(lights),
        camera: camera.ok_or_else(|| anyhow!("the scene defines no camera"))?,
    })
}

struct Loader {
    definitions: HashMap<String, Value>,
    base_dir: PathBuf,
}

impl Loader {
    fn new(entries: &[Value], base_dir: PathBuf) -> Result<Self, Error> {
        let mut definitions: HashMap<String, Value> = HashMap::new();

        for entry in entries {
            let Some(name) = entry.get("define") else {
                continue;
            };
            let name = name
                .as_str()
                .ok_or_else(|| anyhow!("`define` expects a string name, got {name:?}"))?;
            let value = entry
                .get("value")
                .ok_or_else(|| anyhow!("define `{name}` has no value"))?;

            // A define may extend an earlier one, mapping keys override the
            // parent's.
            let value = match entry.get("extend") {
                None => value.clone(),
                Some(parent) => {
                    let parent = parent
                        .as_str()
                        .ok_or_else(|| anyhow!("`extend` expects a string name"))?;
                    let mut merged = definitions
                        .get(parent)
                        .ok_or_else(|| anyhow!("define `{name}` extends unknown `{parent}`"))?
                        .as_mapping()
                        .ok_or_else(|| anyhow!("define `{parent}` is not extendable"))?
                        .clone();

                    let mapping = value
                        .as_mapping()
                        .ok_or_else(|| anyhow!("define `{name}` extends but is not a mapping"))?;
                    merged.extend(mapping.clone());

                    Value::Mapping(merged)
                }
            };

            definitions.insert(name.to_string(), value);
        }

        Ok(Loader {
            definitions,
            base_dir,
        })
    }

    /// A scalar string stands for a define reference wherever a mapping or
    /// sequence is expected.
    fn resolve<'a>(&'a self, value: &'a Value) -> Result<&'a Value, Error> {
        match value.as_str() {
            None => Ok(value),
            Some(name) => self
                .definitions
                .get(name)
                .ok_or_else(|| anyhow!("unknown define `{name}`")),
        }
    }

    fn mk_object(&self, entry: &Value, kind: &str) -> Result<Object, Error> {
        let object = match kind {
            "cube" => Object::new_cube(),
            "plane" => Object::new_plane(),
            "sphere" => Object::new_sphere(),
            "cylinder" | "cone" => {
                let min = f64_key(entry, "min")?.unwrap_or(f64::NEG_INFINITY);
                let max = f64_key(entry, "max")?.unwrap_or(f64::INFINITY);
                let closed = bool_key(entry, "closed")?.unwrap_or(false);

                if kind == "cylinder" {
                    Object::new_cylinder(min, max, closed)
                } else {
                    Object::new_cone(min, max, closed)
                }
            }
            other => bail!("unknown object type `{other}`"),
        }
        .with_material(self.mk_material(entry)?)
        .with_shadow(bool_key(entry, "shadow")?.unwrap_or(true));

        self.apply_transform(object, entry)
    }

    fn mk_obj_file(&self, entry: &Value) -> Result<Object, Error> {
        let file = entry
            .get("file")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("`obj` entries need a `file` key"))?;
        let normalize = bool_key(entry, "normalize")?.unwrap_or(true);

        let model = obj::parse_file(self.base_dir.join(file), normalize)?;
        let model = match usize_key(entry, "divide")? {
            Some(threshold) => model.divide(threshold),
            None => model,
        };

        let model = model
            .with_material(self.mk_material(entry)?)
            .with_shadow(bool_key(entry, "shadow")?.unwrap_or(true));

        self.apply_transform(model, entry)
    }

    fn mk_material(&self, entry: &Value) -> Result<Material, Error> {
        let default = Material::new();

        let Some(material) = entry.get("material") else {
            return Ok(default);
        };
        let material = self.resolve(material)?;

        Ok(Material::new()
            .with_ambient(f64_key(material, "ambient")?.unwrap_or(default.ambient))
            .with_diffuse(f64_key(material, "diffuse")?.unwrap_or(default.diffuse))
            .with_reflective(f64_key(material, "reflective")?.unwrap_or(default.reflective))
            .with_refractive_index(
                f64_key(material, "refractive-index")?.unwrap_or(default.refractive_index),
            )
            .with_shininess(f64_key(material, "shininess")?.unwrap_or(default.shininess))
            .with_specular(f64_key(material, "specular")?.unwrap_or(default.specular))
            .with_transparency(f64_key(material, "transparency")?.unwrap_or(default.transparency))
            .with_pattern(self.mk_pattern(material)?.unwrap_or(default.pattern)))
    }

    fn mk_pattern(&self, material: &Value) -> Result<Option<Pattern>, Error> {
        if let Some(color) = material.get("color") {
            return Ok(Some(Pattern::new_plain(mk_color(color)?)));
        }

        let Some(pattern) = material.get("pattern") else {
            return Ok(None);
        };

        let kind = pattern
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("patterns need a `type`"))?;

        let colors = pattern
            .get("colors")
            .and_then(Value::as_sequence)
            .ok_or_else(|| anyhow!("pattern `{kind}` needs a `colors` list"))?
            .iter()
            .map(mk_color)
            .collect::<Result<Vec<_>, _>>()?;

        if colors.len() < 2 {
            bail!("pattern `{kind}` needs at least two colors");
        }

        let pattern_value = match kind {
            "checkers" => Pattern::new_checker(colors[0], colors[1]),
            "gradient" => Pattern::new_gradient(colors[0], colors[1]),
            "ring" => Pattern::new_ring(colors),
            "stripes" => Pattern::new_stripe(colors),
            other => bail!("unknown pattern `{other}`"),
        };

        Ok(Some(self.apply_transform(pattern_value, pattern)?))
    }

    fn apply_transform<T: Transform>(&self, mut x: T, entry: &Value) -> Result<T, Error> {
        let Some(transforms) = entry.get("transform") else {
            return Ok(x);
        };
        let transforms = transforms
            .as_sequence()
            .ok_or_else(|| anyhow!("`transform` expects a list"))?;

        let mut flattened = vec![];
        self.flatten_transforms(transforms, &mut flattened)?;

        for operation in flattened {
            let operation = operation
                .as_sequence()
                .ok_or_else(|| anyhow!("expected a transform operation, got {operation:?}"))?;
            let name = operation
                .first()
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow!("transform operations start with their name"))?;

            let args = operation[1..]
                .iter()
                .map(f64_value)
                .collect::<Result<Vec<_>, _>>()?;

            let transformation = match (name, args.as_slice()) {
                ("rotate-x", [r]) => rotation_x(*r),
                ("rotate-y", [r]) => rotation_y(*r),
                ("rotate-z", [r]) => rotation_z(*r),
                ("scale", [x, y, z]) => scaling(*x, *y, *z),
                ("translate", [x, y, z]) => translation(*x, *y, *z),
                ("shear", [xy, xz, yx, yz, zx, zy]) => shearing(*xy, *xz, *yx, *yz, *zx, *zy),
                (name, args) => {
                    bail!("unknown transform `{name}` with {} arguments", args.len())
                }
            };

            x = x.transform(&transformation);
        }

        Ok(x)
    }

    // Transform lists may reference defines, which hold lists themselves.
    fn flatten_transforms<'a>(
        &'a self,
        transforms: &'a [Value],
        out: &mut Vec<&'a Value>,
    ) -> Result<(), Error> {
        for transform in transforms {
            if transform.as_str().is_some() {
                let nested = self
                    .resolve(transform)?
                    .as_sequence()
                    .ok_or_else(|| anyhow!("transform define must hold a list"))?;
                self.flatten_transforms(nested, out)?;
            } else {
                out.push(transform);
            }
        }

        Ok(())
    }
}

fn mk_camera(entry: &Value) -> Result<Camera, Error> {
    let width = usize_key(entry, "width")?.ok_or_else(|| anyhow!("camera needs a `width`"))?;
    let height = usize_key(entry, "height")?.ok_or_else(|| anyhow!("camera needs a `height`"))?;
    let fov = f64_key(entry, "field-of-view")?
        .ok_or_else(|| anyhow!("camera needs a `field-of-view`"))?;

    let from = point_key(entry, "from")?.ok_or_else(|| anyhow!("camera needs a `from`"))?;
    let to = point_key(entry, "to")?.ok_or_else(|| anyhow!("camera needs a `to`"))?;
    let up = vector_key(entry, "up")?.ok_or_else(|| anyhow!("camera needs an `up`"))?;

    Ok(Camera::new()
        .with_size(width, height)
        .with_fov(fov)
        .with_transformation(&view_transform(&from, &to, &up)))
}

fn mk_light(entry: &Value) -> Result<Light, Error> {
    let intensity = entry
        .get("intensity")
        .ok_or_else(|| anyhow!("lights need an `intensity`"))
        .and_then(mk_color)?;

    if entry.get("corner").is_some() {
        Ok(Light::new_area_light(
            intensity,
            point_key(entry, "corner")?.ok_or_else(|| anyhow!("area light needs a `corner`"))?,
            vector_key(entry, "uvec")?.ok_or_else(|| anyhow!("area light needs a `uvec`"))?,
            usize_key(entry, "usteps")?.ok_or_else(|| anyhow!("area light needs `usteps`"))? as u32,
            vector_key(entry, "vvec")?.ok_or_else(|| anyhow!("area light needs a `vvec`"))?,
            usize_key(entry, "vsteps")?.ok_or_else(|| anyhow!("area light needs `vsteps`"))? as u32,
        ))
    } else if entry.get("at").is_some() {
        Ok(Light::new_point_light(
            intensity,
            point_key(entry, "at")?.ok_or_else(|| anyhow!("point light needs an `at`"))?,
        ))
    } else {
        bail!("lights need either an `at` or a `corner` key")
    }
}

fn f64_value(value: &Value) -> Result<f64, Error> {
    value
        .as_f64()
        .ok_or_else(|| anyhow!("expected a number, got {value:?}"))
}

fn f64_key(entry: &Value, key: &str) -> Result<Option<f64>, Error> {
    entry.get(key).map(f64_value).transpose()
}

fn usize_key(entry: &Value, key: &str) -> Result<Option<usize>, Error> {
    entry
        .get(key)
        .map(|value| {
            value
                .as_u64()
                .map(|v| v as usize)
                .ok_or_else(|| anyhow!("expected a non-negative integer, got {value:?}"))
        })
        .transpose()
}

fn bool_key(entry: &Value, key: &str) -> Result<Option<bool>, Error> {
    entry
        .get(key)
        .map(|value| {
            value
                .as_bool()
                .ok_or_else(|| anyhow!("expected a boolean, got {value:?}"))
        })
        .transpose()
}

fn triple(value: &Value) -> Result<[f64; 3], Error> {
    let values = value
        .as_sequence()
        .ok_or_else(|| anyhow!("expected a list of three numbers, got {value:?}"))?;
    if values.len() != 3 {
        bail!("expected a list of three numbers, got {} items", values.len());
    }

    Ok([
        f64_value(&values[0])?,
        f64_value(&values[1])?,
        f64_value(&values[2])?,
    ])
}

fn mk_color(value: &Value) -> Result<Color, Error> {
    let [r, g, b] = triple(value)?;
    Ok(Color::new(r, g, b))
}

fn point_key(entry: &Value, key: &str) -> Result<Option<Point>, Error> {
    entry
        .get(key)
        .map(|value| {
            let [x, y, z] = triple(value)?;
            Ok(Point::new(x, y, z))
        })
        .transpose()
}

fn vector_key(entry: &Value, key: &str) -> Result<Option<Vector>, Error> {
    entry
        .get(key)
        .map(|value| {
            let [x, y, z] = triple(value)?;
            Ok(Vector::new(x, y, z))
        })
        .transpose()
}
