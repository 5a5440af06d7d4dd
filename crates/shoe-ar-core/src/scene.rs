//! Placeholder USDA scene text
//!
//! The scene is a unit box with a preview-surface material. It has no relation
//! to the geometry of the matching GLB: only the identifier varies, through the
//! prim names and the diffuse color.

use crate::store::ModelId;

/// Diffuse color for a model: `(0.5 + 0.1*n, 0.3 + 0.05*n, 0.2)`
#[must_use]
pub fn diffuse_color(id: &ModelId) -> [f64; 3] {
    let n = f64::from(id.number());
    [0.5 + n * 0.1, 0.3 + n * 0.05, 0.2]
}

/// Name of the root prim, e.g. `Shoe1`
#[must_use]
pub fn prim_name(id: &ModelId) -> String {
    format!("Shoe{id}")
}

/// Shortest round-trip decimal, always with a fractional part (`1.0`, not `1`)
fn format_channel(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Render the USDA document for a model
#[must_use]
pub fn scene_description(id: &ModelId) -> String {
    let prim = prim_name(id);
    let [r, g, b] = diffuse_color(id);
    let (r, g, b) = (format_channel(r), format_channel(g), format_channel(b));

    format!(
        r#"#usda 1.0
(
    defaultPrim = "{prim}"
    metersPerUnit = 1
    upAxis = "Y"
)

def Xform "{prim}" (
    kind = "component"
)
{{
    def Mesh "ShoeMesh"
    {{
        float3[] extent = [(-0.5, -0.2, -1.0), (0.5, 0.3, 0.2)]
        int[] faceVertexCounts = [4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]
        int[] faceVertexIndices = [0, 1, 3, 2, 2, 3, 5, 4, 4, 5, 7, 6, 6, 7, 1, 0, 1, 7, 5, 3, 6, 0, 2, 4]
        point3f[] points = [(-0.5, -0.2, 0.2), (0.5, -0.2, 0.2), (-0.5, -0.2, -1.0), (0.5, -0.2, -1.0), (-0.5, 0.3, -1.0), (0.5, 0.3, -1.0), (-0.5, 0.3, 0.2), (0.5, 0.3, 0.2)]
        
        def Material "ShoeMaterial"
        {{
            token outputs:surface.connect = </{prim}/ShoeMesh/ShoeMaterial/PreviewSurface.outputs:surface>
            
            def Shader "PreviewSurface"
            {{
                uniform token info:id = "UsdPreviewSurface"
                color3f inputs:diffuseColor = ({r}, {g}, {b})
                float inputs:metallic = 0.1
                float inputs:roughness = 0.8
                token outputs:surface
            }}
        }}
    }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ModelId {
        ModelId::new(s).unwrap()
    }

    #[test]
    fn test_diffuse_color_for_id_2() {
        let [r, g, b] = diffuse_color(&id("2"));
        assert!((r - 0.7).abs() < 1e-12);
        assert!((g - 0.4).abs() < 1e-12);
        assert!((b - 0.2).abs() < 1e-12);
        assert!(scene_description(&id("2")).contains("inputs:diffuseColor = (0.7, 0.4, 0.2)"));
    }

    #[test]
    fn test_non_numeric_id_uses_base_color() {
        assert_eq!(diffuse_color(&id("runner")), [0.5, 0.3, 0.2]);
        assert!(scene_description(&id("runner")).contains("(0.5, 0.3, 0.2)"));
    }

    #[test]
    fn test_channels_keep_decimal_point() {
        assert_eq!(format_channel(1.0), "1.0");
        assert_eq!(format_channel(0.35), "0.35");
        assert!(scene_description(&id("5")).contains("(1.0, 0.55, 0.2)"));
    }

    #[test]
    fn test_identifier_embedded_in_prims() {
        let scene = scene_description(&id("1"));
        assert!(scene.starts_with("#usda 1.0\n"));
        assert!(scene.contains(r#"defaultPrim = "Shoe1""#));
        assert!(scene.contains(r#"def Xform "Shoe1""#));
        assert!(scene.contains("</Shoe1/ShoeMesh/ShoeMaterial/PreviewSurface.outputs:surface>"));
        assert!(!scene.contains("Shoe2"));
    }

    #[test]
    fn test_blank_lines_keep_block_indentation() {
        let scene = scene_description(&id("1"));
        assert!(scene.contains("0.2)]\n        \n        def Material"));
        assert!(scene.contains("surface>\n            \n            def Shader"));
        assert_eq!(scene.lines().filter(|l| l.is_empty()).count(), 1);
    }

    #[test]
    fn test_scene_is_deterministic() {
        assert_eq!(scene_description(&id("3")), scene_description(&id("3")));
    }
}
