//! Bump allocator with block recycling.
//!
//! The arena hands out memory from a current block by bumping a cursor. When
//! the current block cannot satisfy a request it is retired to the `used`
//! list and replaced by the first recycled block that is large enough, or by
//! a fresh block of `max(request, default_size)` bytes. [`Arena::reset`]
//! moves every retired block back to the `avail` list without returning
//! memory to the system.

use std::{
    alloc::{self, Layout},
    cell::RefCell,
    fmt::Debug,
    marker::PhantomData,
    mem,
    ptr::NonNull,
};

/// Alignment of every address returned by the arena.
pub const MAX_ALIGN: usize = 16;

/// Block size used by [`Arena::default`].
pub const DEFAULT_BLOCK_SIZE: usize = kilo_bytes(32);

pub const fn kilo_bytes(bytes: usize) -> usize {
    bytes * 1024
}

const fn align_up(size: usize, align: usize) -> usize {
    (size + align - 1) & !(align - 1)
}

// Evaluated at compile time for every `T` passed to `Arena::alloc`.
struct AssertNoDrop<T>(PhantomData<T>);

impl<T> AssertNoDrop<T> {
    const OK: () = assert!(
        !mem::needs_drop::<T>(),
        "arena values must not need drop: destructors are never run"
    );
}

struct Block {
    data: NonNull<u8>,
    size: usize,
}

impl Block {
    fn new(size: usize) -> Block {
        let layout = Self::layout(size);
        // SAFETY: `layout` has a non-zero size.
        let data = unsafe { alloc::alloc(layout) };
        let data = NonNull::new(data).unwrap_or_else(|| alloc::handle_alloc_error(layout));
        tracing::trace!(size, "arena allocated new block");
        Block { data, size }
    }

    fn layout(size: usize) -> Layout {
        match Layout::from_size_align(size.max(MAX_ALIGN), MAX_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("arena block of {} bytes exceeds the address space", size),
        }
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        // SAFETY: `data` was allocated in `Block::new` with the same layout.
        unsafe { alloc::dealloc(self.data.as_ptr(), Self::layout(self.size)) }
    }
}

struct ArenaState {
    block: Option<Block>,
    cursor: usize,
    used: Vec<Block>,
    avail: Vec<Block>,
    num_allocations: usize,
}

impl ArenaState {
    /// Retires the current block and adopts one with at least `size` bytes.
    fn switch_block(&mut self, size: usize, default_size: usize) -> NonNull<u8> {
        if let Some(block) = self.block.take() {
            self.used.push(block);
        }

        let next = match self.avail.iter().position(|block| block.size >= size) {
            Some(index) => self.avail.remove(index),
            None => Block::new(size.max(default_size)),
        };

        self.cursor = 0;
        self.block.insert(next).data
    }
}

/// Owner of all AST and type memory.
///
/// `alloc` only needs a shared borrow, so nodes allocated earlier can keep
/// referring to each other while more nodes are created. `reset` needs an
/// exclusive borrow, which the borrow checker only grants once every
/// reference into the arena is gone.
pub struct Arena {
    default_size: usize,
    state: RefCell<ArenaState>,
}

impl Arena {
    pub fn new(default_size: usize) -> Self {
        Arena {
            default_size,
            state: RefCell::new(ArenaState {
                block: None,
                cursor: 0,
                used: vec![],
                avail: vec![],
                num_allocations: 0,
            }),
        }
    }

    /// Number of allocations served since the arena was created.
    pub fn total_allocations(&self) -> usize {
        self.state.borrow().num_allocations
    }

    /// Bytes handed out since the last reset, including alignment padding
    /// and the unused tails of retired blocks.
    pub fn total_allocated(&self) -> usize {
        let state = self.state.borrow();
        state.cursor + state.used.iter().map(|block| block.size).sum::<usize>()
    }

    /// Bytes reserved from the system, whether in use or not.
    pub fn capacity(&self) -> usize {
        let state = self.state.borrow();
        state.block.as_ref().map_or(0, |block| block.size)
            + state.used.iter().map(|block| block.size).sum::<usize>()
            + state.avail.iter().map(|block| block.size).sum::<usize>()
    }

    /// Number of blocks owned by the arena.
    pub fn block_count(&self) -> usize {
        let state = self.state.borrow();
        usize::from(state.block.is_some()) + state.used.len() + state.avail.len()
    }

    /// Makes every block available again. All previous allocations are
    /// invalidated, which the `&mut self` receiver enforces.
    pub fn reset(&mut self) {
        let state = self.state.get_mut();
        let used = mem::take(&mut state.used);
        state.avail.splice(0..0, used);
        state.cursor = 0;
    }

    /// Returns `size` bytes aligned to [`MAX_ALIGN`].
    ///
    /// Never fails: running out of memory aborts through
    /// [`alloc::handle_alloc_error`].
    pub fn alloc_raw(&self, size: usize, align: usize) -> NonNull<u8> {
        assert!(
            align.is_power_of_two() && align <= MAX_ALIGN,
            "arena cannot satisfy an alignment of {}",
            align
        );

        let size = align_up(size, MAX_ALIGN);
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.num_allocations += 1;

        let current = match &state.block {
            Some(block) if state.cursor + size <= block.size => Some(block.data),
            _ => None,
        };
        let data = match current {
            Some(data) => data,
            None => state.switch_block(size, self.default_size),
        };

        let offset = state.cursor;
        state.cursor += size;

        // SAFETY: `offset + size` is within the current block.
        unsafe { NonNull::new_unchecked(data.as_ptr().add(offset)) }
    }

    /// Moves `value` into the arena.
    ///
    /// `T` must not need drop; this is checked at compile time.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        #[allow(clippy::let_unit_value)]
        let () = AssertNoDrop::<T>::OK;

        let layout = Layout::new::<T>();
        let ptr = self.alloc_raw(layout.size(), layout.align()).cast::<T>();

        // SAFETY: `ptr` is aligned, sized for `T` and not aliased. The block
        // it lives in is only released by `reset` or `drop`, both of which
        // require exclusive access to the arena.
        unsafe {
            ptr.as_ptr().write(value);
            &mut *ptr.as_ptr()
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(DEFAULT_BLOCK_SIZE)
    }
}

impl Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("default_size", &self.default_size)
            .field("blocks", &self.block_count())
            .field("allocated", &self.total_allocated())
            .field("allocations", &self.total_allocations())
            .finish()
    }
}
