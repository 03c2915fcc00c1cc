/// WGSL shader for the body passes: instanced spheres, ambient plus
/// emissive shading. This scene has no directional light; a basic material
/// is just an emissive-free instance.
pub const BODY_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    // rgb premultiplied by the ambient intensity
    ambient: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) base_color: vec4<f32>,
    // w carries the emissive intensity
    @location(7) emissive: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) base_color: vec4<f32>,
    @location(1) emissive: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.base_color = instance.base_color;
    out.emissive = instance.emissive;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let lit = in.base_color.rgb * globals.ambient.rgb + in.emissive.rgb * in.emissive.a;
    return vec4<f32>(lit, 1.0);
}
"#;

/// Bright-extract pass: keeps luminance above the threshold, with a soft
/// knee controlled by the smoothing parameter. At threshold 0 the pass is
/// an identity copy.
pub const BRIGHT_SHADER: &str = r#"
struct BrightParams {
    threshold: f32,
    smoothing: f32,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var src: texture_2d<f32>;
@group(0) @binding(1)
var samp: sampler;
@group(0) @binding(2)
var<uniform> params: BrightParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) index: u32) -> VertexOutput {
    let corner = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VertexOutput;
    out.clip_position = vec4<f32>(corner * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = corner;
    return out;
}

@fragment
fn fs_bright(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(src, samp, in.uv).rgb;
    let brightness = max(color.r, max(color.g, color.b));
    let knee = params.threshold * params.smoothing + 1e-4;
    let soft = clamp(brightness - params.threshold + knee, 0.0, 2.0 * knee);
    let soft_curve = soft * soft / (4.0 * knee);
    let contribution = max(soft_curve, brightness - params.threshold) / max(brightness, 1e-4);
    return vec4<f32>(color * contribution, 1.0);
}
"#;

/// One axis of the separable Gaussian blur. Run twice with horizontal and
/// vertical direction uniforms; the radius widens the tap spacing.
pub const BLUR_SHADER: &str = r#"
struct BlurParams {
    direction: vec2<f32>,
    radius: f32,
    _pad: f32,
};

@group(0) @binding(0)
var src: texture_2d<f32>;
@group(0) @binding(1)
var samp: sampler;
@group(0) @binding(2)
var<uniform> params: BlurParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) index: u32) -> VertexOutput {
    let corner = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VertexOutput;
    out.clip_position = vec4<f32>(corner * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = corner;
    return out;
}

@fragment
fn fs_blur(in: VertexOutput) -> @location(0) vec4<f32> {
    var weights = array<f32, 5>(0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);
    let texel = 1.0 / vec2<f32>(textureDimensions(src));
    let step = params.direction * texel * (1.0 + params.radius);

    var acc = textureSample(src, samp, in.uv).rgb * weights[0];
    for (var i = 1; i < 5; i++) {
        let offset = step * f32(i);
        acc += textureSample(src, samp, in.uv + offset).rgb * weights[i];
        acc += textureSample(src, samp, in.uv - offset).rgb * weights[i];
    }
    return vec4<f32>(acc, 1.0);
}
"#;

/// Final composite: base color pass plus the blurred glow, scaled by the
/// bloom strength.
pub const COMPOSITE_SHADER: &str = r#"
struct CompositeParams {
    strength: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var scene_tex: texture_2d<f32>;
@group(0) @binding(1)
var bloom_tex: texture_2d<f32>;
@group(0) @binding(2)
var samp: sampler;
@group(0) @binding(3)
var<uniform> params: CompositeParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) index: u32) -> VertexOutput {
    let corner = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VertexOutput;
    out.clip_position = vec4<f32>(corner * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = corner;
    return out;
}

@fragment
fn fs_composite(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(scene_tex, samp, in.uv).rgb;
    let glow = textureSample(bloom_tex, samp, in.uv).rgb;
    return vec4<f32>(base + glow * params.strength, 1.0);
}
"#;
