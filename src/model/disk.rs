use {
    crate::{disk::Disk, mesh::RenderBuffer, model::ModelVertex},
    log::debug,
};

/// Per disk shader inputs: placement and material.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DiskUniform {
    model: [[f32; 4]; 4],
    diffuse: [f32; 4],
    /// x: shininess
    shading: [f32; 4],
}

impl DiskUniform {
    pub fn from_disk(disk: &Disk) -> Self {
        let material = disk.material();
        DiskUniform {
            model: disk.transform().to_matrix().into(),
            diffuse: material.diffuse.as_array(),
            shading: [material.shininess, 0.0, 0.0, 0.0],
        }
    }
}

/// Interleaves a render buffer into GPU vertices, reusing `out`'s storage.
pub fn interleave(buffer: &RenderBuffer, out: &mut Vec<ModelVertex>) {
    out.clear();
    out.extend(buffer.vertices().iter().zip(buffer.normals()).map(|(p, n)| ModelVertex {
        position: [p.x, p.y, p.z],
        normal: [n.x, n.y, n.z],
    }));
}

/// GPU copy of one disk, rewritten every frame.
///
/// Buffers only grow; a frame that fits the current capacity is a plain `write_buffer`.
pub struct DiskMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub num_elements: u32,
    capacity: usize,
    scratch: Vec<ModelVertex>,
}

impl DiskMesh {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, disk: &Disk) -> Self {
        let capacity = disk.render_mesh().len().max(3);
        let (vertex_buffer, index_buffer) = create_geometry_buffers(device, capacity);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Disk Uniform Buffer"),
            size: std::mem::size_of::<DiskUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("disk_bind_group"),
        });

        DiskMesh {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            num_elements: 0,
            capacity,
            scratch: Vec::with_capacity(capacity),
        }
    }

    /// Uploads the disk's latest mesh and uniforms.
    pub fn update(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, disk: &Disk) {
        let buffer = disk.render_mesh();
        if buffer.len() > self.capacity {
            self.capacity = buffer.len().next_power_of_two();
            debug!("growing disk mesh to {} vertices", self.capacity);
            let (vertex_buffer, index_buffer) = create_geometry_buffers(device, self.capacity);
            self.vertex_buffer = vertex_buffer;
            self.index_buffer = index_buffer;
        }

        interleave(buffer, &mut self.scratch);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.scratch));
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(buffer.indices()));
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[DiskUniform::from_disk(disk)]),
        );
        self.num_elements = buffer.indices().len() as u32;
    }
}

fn create_geometry_buffers(
    device: &wgpu::Device,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::Buffer) {
    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Vertex Buffer"),
        size: (capacity * std::mem::size_of::<ModelVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Index Buffer"),
        size: (capacity * std::mem::size_of::<u32>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    (vertex_buffer, index_buffer)
}

pub trait DrawDisk<'a> {
    fn draw_disk(&mut self, disk: &'a DiskMesh);
}

impl<'a, 'b> DrawDisk<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_disk(&mut self, disk: &'b DiskMesh) {
        self.set_bind_group(1, &disk.bind_group, &[]);
        self.set_vertex_buffer(0, disk.vertex_buffer.slice(..));
        self.set_index_buffer(disk.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..disk.num_elements, 0, 0..1);
    }
}
