use glam::Vec3;

/// A value bindable to one shader uniform field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    /// Linear RGB, edited with a color picker instead of drag values.
    Color([f32; 3]),
}

/// Slider constraints for panel-editable values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }
}

/// Declaration of one uniform parameter: name, initial value, optional
/// panel range, optional panel section.
#[derive(Debug, Clone)]
pub struct UniformDecl {
    pub name: &'static str,
    pub value: UniformValue,
    pub range: Option<Range>,
    pub group: Option<&'static str>,
}

impl UniformDecl {
    pub const fn float(name: &'static str, value: f32) -> Self {
        Self {
            name,
            value: UniformValue::Float(value),
            range: None,
            group: None,
        }
    }

    pub const fn vec3(name: &'static str, value: Vec3) -> Self {
        Self {
            name,
            value: UniformValue::Vec3(value),
            range: None,
            group: None,
        }
    }

    pub const fn color(name: &'static str, value: [f32; 3]) -> Self {
        Self {
            name,
            value: UniformValue::Color(value),
            range: None,
            group: None,
        }
    }

    pub const fn with_range(mut self, min: f32, max: f32, step: f32) -> Self {
        self.range = Some(Range::new(min, max, step));
        self
    }

    pub const fn in_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }
}

#[derive(Debug, Clone)]
pub struct UniformEntry {
    pub decl: UniformDecl,
    offset: usize,
}

/// Ordered uniform parameter table shared between the material and the
/// control panel. Field offsets follow WGSL uniform address-space layout
/// (f32 align 4, vec3 align 16), so the packed bytes can back the shader's
/// params struct directly. Mutations are visible in the packed bytes on
/// the next `write_into` call within the same frame.
#[derive(Debug, Clone, Default)]
pub struct UniformSet {
    entries: Vec<UniformEntry>,
    byte_len: usize,
}

fn align_to(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

impl UniformSet {
    pub fn new(decls: Vec<UniformDecl>) -> Self {
        let mut entries = Vec::with_capacity(decls.len());
        let mut offset = 0usize;

        for decl in decls {
            let (align, size) = match decl.value {
                UniformValue::Float(_) => (4, 4),
                UniformValue::Vec3(_) | UniformValue::Color(_) => (16, 12),
            };
            offset = align_to(offset, align);
            entries.push(UniformEntry { decl, offset });
            offset += size;
        }

        // Uniform buffer bindings round the struct size up to 16.
        let byte_len = align_to(offset.max(4), 16);
        Self { entries, byte_len }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn entries(&self) -> &[UniformEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [UniformEntry] {
        &mut self.entries
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.decl.name == name)
            .map(|e| e.offset)
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries
            .iter()
            .find(|e| e.decl.name == name)
            .map(|e| e.decl.value)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name) {
            Some(UniformValue::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name) {
            Some(UniformValue::Vec3(v)) => Some(v),
            Some(UniformValue::Color(c)) => Some(Vec3::from_array(c)),
            _ => None,
        }
    }

    /// Set a value. Returns false if the name is unknown or the type
    /// does not match the declaration.
    pub fn set(&mut self, name: &str, value: UniformValue) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.decl.name == name) else {
            return false;
        };
        match (&entry.decl.value, &value) {
            (UniformValue::Float(_), UniformValue::Float(_))
            | (UniformValue::Vec3(_), UniformValue::Vec3(_))
            | (UniformValue::Color(_), UniformValue::Color(_)) => {
                entry.decl.value = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> bool {
        self.set(name, UniformValue::Float(value))
    }

    /// Set a float, clamped to the declared range when one exists.
    /// Used by the panel so bound values stay within min/max.
    pub fn set_float_clamped(&mut self, name: &str, value: f32) -> bool {
        let clamped = match self.entries.iter().find(|e| e.decl.name == name) {
            Some(entry) => match entry.decl.range {
                Some(range) => value.clamp(range.min, range.max),
                None => value,
            },
            None => return false,
        };
        self.set_float(name, clamped)
    }

    /// Pack all values into `out` at their WGSL offsets.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.clear();
        out.resize(self.byte_len, 0);
        for entry in &self.entries {
            let (array, len) = match &entry.decl.value {
                UniformValue::Float(v) => ([*v, 0.0, 0.0], 4),
                UniformValue::Vec3(v) => (v.to_array(), 12),
                UniformValue::Color(c) => (*c, 12),
            };
            let bytes = &bytemuck::cast_slice::<f32, u8>(&array)[..len];
            out[entry.offset..entry.offset + len].copy_from_slice(bytes);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_offsets_pack_tightly() {
        let set = UniformSet::new(vec![
            UniformDecl::float("a", 1.0),
            UniformDecl::float("b", 2.0),
            UniformDecl::float("c", 3.0),
        ]);
        assert_eq!(set.offset_of("a"), Some(0));
        assert_eq!(set.offset_of("b"), Some(4));
        assert_eq!(set.offset_of("c"), Some(8));
        assert_eq!(set.byte_len(), 16);
    }

    #[test]
    fn vec3_is_aligned_to_sixteen() {
        let set = UniformSet::new(vec![
            UniformDecl::float("a", 1.0),
            UniformDecl::vec3("v", Vec3::ONE),
            UniformDecl::float("b", 2.0),
        ]);
        assert_eq!(set.offset_of("a"), Some(0));
        assert_eq!(set.offset_of("v"), Some(16));
        // f32 may ride in a vec3's tail padding
        assert_eq!(set.offset_of("b"), Some(28));
        assert_eq!(set.byte_len(), 32);
    }

    #[test]
    fn mutation_is_visible_in_same_call() {
        let mut set = UniformSet::new(vec![UniformDecl::float("uTime", 0.0)]);
        assert!(set.set_float("uTime", 1.5));
        let bytes = set.to_bytes();
        assert_eq!(f32::from_le_bytes(bytes[0..4].try_into().unwrap()), 1.5);
    }

    #[test]
    fn vec3_bytes_land_at_their_offset() {
        let set = UniformSet::new(vec![
            UniformDecl::float("a", 1.0),
            UniformDecl::vec3("v", Vec3::new(2.0, 3.0, 4.0)),
        ]);
        let bytes = set.to_bytes();
        let read = |o: usize| f32::from_le_bytes(bytes[o..o + 4].try_into().unwrap());
        assert_eq!(read(0), 1.0);
        assert_eq!(read(16), 2.0);
        assert_eq!(read(20), 3.0);
        assert_eq!(read(24), 4.0);
    }

    #[test]
    fn ranged_values_clamp_on_set() {
        let mut set = UniformSet::new(vec![
            UniformDecl::float("uWaveHeight", 0.3).with_range(0.0, 2.0, 0.01)
        ]);
        assert!(set.set_float_clamped("uWaveHeight", 5.0));
        assert_eq!(set.float("uWaveHeight"), Some(2.0));
        assert!(set.set_float_clamped("uWaveHeight", -1.0));
        assert_eq!(set.float("uWaveHeight"), Some(0.0));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let mut set = UniformSet::new(vec![UniformDecl::float("a", 0.0)]);
        assert!(!set.set_float("missing", 1.0));
        assert!(set.get("missing").is_none());
    }
}
