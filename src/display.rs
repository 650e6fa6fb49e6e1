/*!
Presents pixel buffers in a window with `wgpu`.

Each submitted buffer is copied into a texture with the same dimensions, and a
full-screen triangle strip draws it onto the surface texel for texel
(`shader.wgsl`). When the surface format is sRGB the texture is sRGB too, so
buffer bytes reach the screen unchanged.
*/

use std::num::NonZeroU32;

use anyhow::anyhow;
use log::{debug, info, warn};
use winit::window::Window;

use crate::{pixel::Rgba, screen, sink::Sink};

struct Image {
    size: screen::Size,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl Image {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        size: screen::Size,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("image-texture"),
            size: extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        });

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("render-bind-group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture_view),
            }],
        });

        Self {
            size,
            texture,
            bind_group,
        }
    }
}

fn extent(size: screen::Size) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    }
}

pub struct Display {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    image_format: wgpu::TextureFormat,
    render_bind_group_layout: wgpu::BindGroupLayout,
    render_pipeline: wgpu::RenderPipeline,
    image: Image,
}

impl Display {
    /// `window` must outlive the returned display.
    pub fn new(window: &Window) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let inner_size = window.inner_size();
        let size = screen::Size::new(inner_size.width.max(1), inner_size.height.max(1));
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or_else(|| anyhow!("no graphics adapter can present to this window"))?;
        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let surface_format = surface
            .get_supported_formats(&adapter)
            .first()
            .copied()
            .ok_or_else(|| anyhow!("surface is incompatible with the adapter"))?;
        let image_format = if surface_format.describe().srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        debug!(
            "surface format {:?}, image format {:?}",
            surface_format, image_format
        );

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        let render_shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("render-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let render_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("render-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                }],
            });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("render-pipeline-layout"),
                bind_group_layouts: &[&render_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &render_shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &render_shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_configuration.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let image = Image::new(&device, &render_bind_group_layout, image_format, size);

        Ok(Self {
            surface,
            device,
            queue,
            surface_configuration,
            image_format,
            render_bind_group_layout,
            render_pipeline,
            image,
        })
    }

    /// The size the surface is currently configured for.
    pub fn size(&self) -> screen::Size {
        screen::Size::new(
            self.surface_configuration.width,
            self.surface_configuration.height,
        )
    }

    pub fn resize(&mut self, size: screen::Size) {
        self.surface_configuration.width = size.width;
        self.surface_configuration.height = size.height;
        self.surface.configure(&self.device, &self.surface_configuration);
    }

    fn current_texture(&mut self) -> anyhow::Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(surface_texture) => Ok(Some(surface_texture)),
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("{}, reconfiguring surface", error);
                self.surface.configure(&self.device, &self.surface_configuration);
                Ok(Some(self.surface.get_current_texture()?))
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out acquiring surface texture, skipping frame");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl Sink for Display {
    fn submit(&mut self, pixels: &[Rgba], size: screen::Size) -> anyhow::Result<()> {
        assert_eq!(
            pixels.len(),
            size.pixel_count(),
            "pixel buffer does not match a {}x{} surface",
            size.width,
            size.height
        );

        if self.image.size != size {
            self.image = Image::new(
                &self.device,
                &self.render_bind_group_layout,
                self.image_format,
                size,
            );
        }

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.image.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(pixels),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(std::mem::size_of::<Rgba>() as u32 * size.width),
                rows_per_image: NonZeroU32::new(size.height),
            },
            extent(size),
        );

        let surface_texture = match self.current_texture()? {
            Some(surface_texture) => surface_texture,
            None => return Ok(()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let command_encoder = {
            let mut command_encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

            command_encoder.push_debug_group("render-pass");
            {
                let mut render_pass =
                    command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("render-pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &surface_texture_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: true,
                            },
                        })],
                        depth_stencil_attachment: None,
                    });

                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.image.bind_group, &[]);
                render_pass.draw(0..4, 0..1);
            }
            command_encoder.pop_debug_group();

            command_encoder
        };

        self.queue.submit([command_encoder.finish()]);
        surface_texture.present();
        Ok(())
    }
}
