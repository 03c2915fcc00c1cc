use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Generate a unit-radius UV sphere. Body radius comes from the instance
/// transform's scale, so one mesh serves every body.
pub fn uv_sphere(stacks: u32, slices: u32) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for stack in 0..=stacks {
        let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
        for slice in 0..=slices {
            let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
            let position = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            vertices.push(Vertex {
                position,
                normal: position,
            });
        }
    }

    let ring = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = (stack * ring + slice) as u16;
            let b = a + ring as u16;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let (vertices, indices) = uv_sphere(32, 32);
        assert_eq!(vertices.len(), 33 * 33);
        assert_eq!(indices.len(), 32 * 32 * 6);
    }

    #[test]
    fn positions_lie_on_the_unit_sphere() {
        let (vertices, _) = uv_sphere(8, 8);
        for v in &vertices {
            let len =
                (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn normals_match_positions() {
        let (vertices, _) = uv_sphere(8, 8);
        for v in &vertices {
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let (vertices, indices) = uv_sphere(32, 32);
        let max = *indices.iter().max().unwrap() as usize;
        assert!(max < vertices.len());
    }

    #[test]
    fn index_count_fits_u16() {
        let (vertices, _) = uv_sphere(32, 32);
        assert!(vertices.len() <= u16::MAX as usize);
    }
}
