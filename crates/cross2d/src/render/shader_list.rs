use std::fmt;
use std::path::Path;

use crate::device::Device;
use crate::io::{FileType, Io};

use super::builtin;
use super::shader::Shader;

/// Name of the reserved slot at index 0.
pub const DEFAULT_SHADER: &str = "none";

/// Name of the built-in flat color shader.
pub const COLOR_SHADER: &str = "color";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderListError {
    /// A shader with this name is already registered.
    Duplicate(String),
    EmptyName,
}

impl fmt::Display for ShaderListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderListError::Duplicate(name) => write!(f, "shader `{name}` is already registered"),
            ShaderListError::EmptyName => write!(f, "shader name must not be empty"),
        }
    }
}

impl std::error::Error for ShaderListError {}

/// Ordered registry of shaders with unique names.
///
/// Invariants:
/// - index 0 always exists (the default shader, named [`DEFAULT_SHADER`])
/// - names are unique; duplicates are rejected, never overwritten
/// - insertion order is preserved, so indices are stable
///
/// Dropping the list releases every shader in registry order.
pub struct ShaderList {
    device: Device,
    shaders: Vec<Shader>,
    color: usize,
}

impl ShaderList {
    /// Registry holding only the reserved slot, as an unavailable placeholder.
    pub fn empty(device: &Device) -> Self {
        Self {
            device: device.clone(),
            shaders: vec![Shader::placeholder(device, DEFAULT_SHADER)],
            color: 0,
        }
    }

    /// Registry with the embedded shader pack: a textured default shader at
    /// index 0 and the flat color shader right after it.
    pub fn new(device: &Device) -> Self {
        let mut list = Self::empty(device);

        list.shaders[0] = Shader::compile(
            device,
            DEFAULT_SHADER,
            builtin::TEXTURE_VERTEX,
            builtin::TEXTURE_FRAGMENT,
        );

        let color = Shader::compile(device, COLOR_SHADER, builtin::COLOR_VERTEX, builtin::COLOR_FRAGMENT);
        match list.add(color) {
            Ok(index) => list.color = index,
            Err(e) => log::error!("built-in shader pack: {e}"),
        }

        log::debug!(
            "shader list: {} built-in shader(s), {} available",
            list.len(),
            list.iter().filter(|s| s.is_available()).count()
        );
        list
    }

    /// Appends `shader` under its own name and returns its index.
    pub fn add(&mut self, shader: Shader) -> Result<usize, ShaderListError> {
        if shader.name().is_empty() {
            return Err(ShaderListError::EmptyName);
        }
        if self.index_of(shader.name()).is_some() {
            return Err(ShaderListError::Duplicate(shader.name().to_string()));
        }
        self.shaders.push(shader);
        Ok(self.shaders.len() - 1)
    }

    /// Replaces the shader in the reserved slot, returning the previous one.
    ///
    /// The new shader must not share a name with any other entry.
    pub fn set_default(&mut self, shader: Shader) -> Result<Shader, ShaderListError> {
        if shader.name().is_empty() {
            return Err(ShaderListError::EmptyName);
        }
        if self.shaders[1..].iter().any(|s| s.name() == shader.name()) {
            return Err(ShaderListError::Duplicate(shader.name().to_string()));
        }
        Ok(std::mem::replace(&mut self.shaders[0], shader))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Shader> {
        self.shaders.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Shader> {
        self.index_of(name).map(|i| &self.shaders[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.shaders.iter().position(|s| s.name() == name)
    }

    /// The shader in the reserved slot.
    #[inline]
    pub fn default_shader(&self) -> &Shader {
        &self.shaders[0]
    }

    /// The flat color shader (the default slot when none was registered).
    #[inline]
    pub fn color(&self) -> &Shader {
        &self.shaders[self.color]
    }

    /// Number of entries, reserved slot included. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Always false: the reserved slot exists for the list's whole lifetime.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shader> {
        self.shaders.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shaders.iter().map(Shader::name)
    }

    /// Compiles every `<name>.vert` / `<name>.frag` pair found in `dir` and
    /// registers it as `<name>`. Pairs are visited in name order.
    ///
    /// A missing directory leaves the embedded shaders as the only ones.
    /// Incomplete pairs and duplicate names are skipped with a warning.
    /// Returns how many shaders were registered.
    pub fn load_pack(&mut self, io: &dyn Io, dir: &Path) -> usize {
        if io.file_type(dir) != FileType::Directory {
            log::info!("no shader pack at {}, using embedded shaders", dir.display());
            return 0;
        }

        let mut added = 0;
        for entry in io.list_dir(dir, true, false) {
            if entry.file_type != FileType::File {
                continue;
            }
            let Some(stem) = entry.name.strip_suffix(".vert") else {
                continue;
            };

            let fragment_path = dir.join(format!("{stem}.frag"));
            let (Some(vertex), Some(fragment)) =
                (io.read_to_string(&entry.path), io.read_to_string(&fragment_path))
            else {
                log::warn!("shader pack: `{stem}` is missing a readable stage, skipped");
                continue;
            };

            let shader = Shader::compile(&self.device, stem, &vertex, &fragment);
            match self.add(shader) {
                Ok(_) => added += 1,
                Err(e) => log::warn!("shader pack: {e}, skipped"),
            }
        }

        log::info!("shader pack {}: {added} shader(s) registered", dir.display());
        added
    }
}

impl fmt::Debug for ShaderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.shaders.iter().map(Shader::name)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::{recording_device, GlCall};
    use crate::io::DesktopIo;
    use tempfile::tempdir;

    #[test]
    fn new_list_has_default_and_color_slots() {
        let (device, _gl) = recording_device();
        let list = ShaderList::new(&device);

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().name(), DEFAULT_SHADER);
        assert!(list.default_shader().is_available());
        assert_eq!(list.color().name(), COLOR_SHADER);
        assert!(list.color().is_available());
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["none", "color"]);
    }

    #[test]
    fn reserved_slot_exists_without_gpu() {
        let list = ShaderList::new(&Device::unavailable());
        assert!(list.get(0).is_some());
        assert!(!list.is_empty());
        assert!(!list.default_shader().is_available());
    }

    #[test]
    fn empty_list_still_has_reserved_slot() {
        let list = ShaderList::empty(&Device::unavailable());
        assert_eq!(list.len(), 1);
        assert_eq!(list.color().name(), DEFAULT_SHADER);
    }

    #[test]
    fn index_and_name_lookup_agree() {
        let (device, _gl) = recording_device();
        let mut list = ShaderList::new(&device);
        let shader = Shader::compile(&device, "crt", builtin::COLOR_VERTEX, builtin::COLOR_FRAGMENT);
        let index = list.add(shader).unwrap();

        assert_eq!(index, 2);
        let by_index = list.get(index).unwrap();
        let by_name = list.get_by_name("crt").unwrap();
        assert!(std::ptr::eq(by_index, by_name));
        assert_eq!(list.index_of("crt"), Some(2));
        assert!(list.get_by_name("missing").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected_and_released() {
        let (device, gl) = recording_device();
        let mut list = ShaderList::new(&device);
        let original = list.color().program();

        let dup = Shader::compile(&device, COLOR_SHADER, builtin::COLOR_VERTEX, builtin::COLOR_FRAGMENT);
        assert_eq!(
            list.add(dup),
            Err(ShaderListError::Duplicate(COLOR_SHADER.to_string()))
        );

        assert_eq!(list.len(), 2);
        assert_eq!(list.color().program(), original);
        assert_eq!(gl.live_programs(), 2);
    }

    #[test]
    fn empty_names_are_rejected() {
        let (device, _gl) = recording_device();
        let mut list = ShaderList::empty(&device);
        assert_eq!(
            list.add(Shader::placeholder(&device, "")),
            Err(ShaderListError::EmptyName)
        );
    }

    #[test]
    fn set_default_replaces_reserved_slot() {
        let (device, _gl) = recording_device();
        let mut list = ShaderList::empty(&device);
        let shader = Shader::compile(&device, DEFAULT_SHADER, builtin::COLOR_VERTEX, builtin::COLOR_FRAGMENT);

        let old = list.set_default(shader).unwrap();
        assert!(!old.is_available());
        assert!(list.default_shader().is_available());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn failed_shader_does_not_abort_registration() {
        let (device, _gl) = recording_device();
        let mut list = ShaderList::new(&device);
        list.add(Shader::compile(&device, "bad", "garbage", "garbage")).unwrap();
        list.add(Shader::compile(&device, "good", builtin::COLOR_VERTEX, builtin::COLOR_FRAGMENT))
            .unwrap();

        assert!(!list.get_by_name("bad").unwrap().is_available());
        assert!(list.get_by_name("good").unwrap().is_available());
    }

    #[test]
    fn drop_releases_programs_in_registry_order() {
        let (device, gl) = recording_device();
        let list = ShaderList::new(&device);
        let expected: Vec<u32> = list.iter().filter_map(|s| s.program()).map(|p| p.0.get()).collect();
        gl.clear_calls();

        drop(list);
        let deleted: Vec<u32> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::DeleteProgram(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(deleted, expected);
        assert_eq!(gl.live_programs(), 0);
    }

    // ── shader packs ──────────────────────────────────────────────────────

    #[test]
    fn load_pack_registers_complete_pairs_in_name_order() {
        let dir = tempdir().unwrap();
        let io = DesktopIo::new(dir.path());
        for name in ["scanlines", "lcd3x"] {
            io.write(&dir.path().join(format!("{name}.vert")), builtin::COLOR_VERTEX.as_bytes());
            io.write(&dir.path().join(format!("{name}.frag")), builtin::COLOR_FRAGMENT.as_bytes());
        }
        // Vertex stage without a fragment stage.
        io.write(&dir.path().join("orphan.vert"), builtin::COLOR_VERTEX.as_bytes());
        io.write(&dir.path().join("README.txt"), b"not a shader");

        let (device, _gl) = recording_device();
        let mut list = ShaderList::new(&device);
        assert_eq!(list.load_pack(&io, dir.path()), 2);

        assert_eq!(
            list.names().collect::<Vec<_>>(),
            vec!["none", "color", "lcd3x", "scanlines"]
        );
        assert!(list.get_by_name("lcd3x").unwrap().is_available());
    }

    #[test]
    fn load_pack_skips_names_already_registered() {
        let dir = tempdir().unwrap();
        let io = DesktopIo::new(dir.path());
        io.write(&dir.path().join("color.vert"), builtin::COLOR_VERTEX.as_bytes());
        io.write(&dir.path().join("color.frag"), builtin::COLOR_FRAGMENT.as_bytes());

        let (device, _gl) = recording_device();
        let mut list = ShaderList::new(&device);
        assert_eq!(list.load_pack(&io, dir.path()), 0);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn missing_pack_keeps_embedded_defaults() {
        let dir = tempdir().unwrap();
        let io = DesktopIo::new(dir.path());
        let (device, _gl) = recording_device();
        let mut list = ShaderList::new(&device);

        assert_eq!(list.load_pack(&io, &dir.path().join("shaders")), 0);
        assert_eq!(list.len(), 2);
    }
}
