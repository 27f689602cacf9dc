// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! WGSL sources embedded at compile time.

/// Forward shading with GGX specular, hemisphere/ambient fill and a
/// PCF-filtered directional shadow map.
///
/// Bind groups: 0 = frame uniform, shadow map and comparison sampler;
/// 1 = per-object uniform.
pub const LIT_WGSL: &str = include_str!("lit.wgsl");

/// Vertex-only depth pass used to fill the shadow map.
///
/// Bind groups: 0 = light view-projection; 1 = per-object uniform.
pub const SHADOW_WGSL: &str = include_str!("shadow.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_shader_has_both_stages() {
        assert!(LIT_WGSL.contains("@vertex"));
        assert!(LIT_WGSL.contains("@fragment"));
        assert!(LIT_WGSL.contains("textureSampleCompareLevel"));
    }

    #[test]
    fn test_shadow_shader_is_vertex_only() {
        assert!(SHADOW_WGSL.contains("@vertex"));
        assert!(!SHADOW_WGSL.contains("@fragment"));
    }

    #[test]
    fn test_object_struct_matches_between_passes() {
        fn object_decl(src: &str) -> Vec<&str> {
            let start = src.find("struct Object").unwrap();
            let end = start + src[start..].find("};").unwrap();
            src[start..end]
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with("//"))
                .collect()
        }
        assert_eq!(object_decl(LIT_WGSL), object_decl(SHADOW_WGSL));
    }
}
