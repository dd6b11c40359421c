//! Module text rendering
//!
//! Output is a pure function of the definition, so re-runs are byte-identical.

use std::fmt::Write;

use crate::definition::EffectDefinition;
use crate::naming::{binding_name, module_file_name};
use crate::taxonomy::ParameterSpec;

/// Render a definition as a standalone effect module.
pub fn to_module_text(def: &EffectDefinition, module_suffix: &str) -> String {
    let c = &def.compatibility;
    let tags = def
        .tags
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");
    let parameters = def
        .parameters
        .iter()
        .map(render_parameter)
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"// {file}

export const {binding} = {{
  id: "{id}",
  name: "{name}",

  description: `{description}`,

  category: "{category}",
  subcategory: "{subcategory}",
  intensity: "{intensity}",
  performance: "{performance}",

  compatibility: {{
    text: {text},
    image: {image},
    logo: {logo},
    background: {background}
  }},

  tags: [{tags}],

  parameters: {{
    // Defaults, tune per effect
{parameters}
  }},

  preview: {{
    gif: "{gif}",
    duration: {duration},
    loop: {looping}
  }},

  engine: (element, params) => {{
    {engine}
  }}
}};
"#,
        file = module_file_name(&def.id, module_suffix),
        binding = binding_name(&def.id),
        id = def.id,
        name = def.name,
        description = def.description,
        category = def.category.as_str(),
        subcategory = def.subcategory.as_str(),
        intensity = def.intensity.as_str(),
        performance = def.performance.as_str(),
        text = c.text,
        image = c.image,
        logo = c.logo,
        background = c.background,
        tags = tags,
        parameters = parameters,
        gif = def.preview.gif,
        duration = def.preview.duration_ms,
        looping = def.preview.looping,
        engine = def.engine,
    )
}

fn render_parameter(p: &ParameterSpec) -> String {
    format!(
        r#"    {key}: {{
      type: "range",
      min: {min},
      max: {max},
      default: {default},
      description: "{description}"
    }}"#,
        key = p.key,
        min = p.min,
        max = p.max,
        default = p.default,
        description = p.description,
    )
}

const FILTER_FUNCTION: &str = r#"// Filter helper over allEffects
export function filterEffects(criteria = {}) {
  const { category, subcategory, intensity, performance, tags, compatibility } = criteria;

  return Object.values(allEffects).filter(effect => {
    if (category && effect.category !== category) return false;
    if (subcategory && effect.subcategory !== subcategory) return false;
    if (intensity && effect.intensity !== intensity) return false;
    if (performance && effect.performance !== performance) return false;
    if (tags && tags.length && !tags.some(tag => effect.tags.includes(tag))) return false;
    if (compatibility && !Object.keys(compatibility).every(key =>
      compatibility[key] ? effect.compatibility[key] : true
    )) return false;

    return true;
  });
}
"#;

/// Render the aggregation index: per-effect import + re-export, the id -> binding
/// map, and the filter.
///
/// Each binding is imported into local scope first; `allEffects` refers to it.
/// `ids` must already be lower-cased and in processing order.
pub fn render_index<S: AsRef<str>>(ids: &[S], module_suffix: &str, index_file: &str) -> String {
    let mut out = format!("// {} - Auto-generated effects index\n", index_file);

    for id in ids {
        let id = id.as_ref();
        let binding = binding_name(id);
        let _ = writeln!(
            out,
            "import {{ {} }} from './{}';",
            binding,
            module_file_name(id, module_suffix)
        );
        let _ = writeln!(out, "export {{ {} }};", binding);
    }

    let entries = ids
        .iter()
        .map(|id| format!("  \"{}\": {}", id.as_ref(), binding_name(id.as_ref())))
        .collect::<Vec<_>>()
        .join(",\n");

    let _ = write!(out, "\n// Every converted effect, keyed by id\nexport const allEffects = {{\n{}\n}};\n\n", entries);
    out.push_str(FILTER_FUNCTION);
    out
}
