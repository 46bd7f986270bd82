//! Read-only traversal of the syntax tree with optional pre/post hooks.
//!
//! A [`Callbacks`] value holds at most one pre hook and one post hook for
//! each hooked node category. [`visit`] walks a tree depth-first, calling
//! the registered hooks, and always descends into children whether or not a
//! hook exists for the current node:
//!
//! ```
//! use sqlast::ast::visitor::{visit, Callbacks};
//!
//! let statements = sqlast::parse("generic", "SELECT * FROM a JOIN b ON a.id = b.id").unwrap();
//! let mut tables = vec![];
//! let mut callbacks = Callbacks::new().on_relation(|name| tables.push(name.to_string()));
//! visit(&statements, &mut callbacks).unwrap();
//! drop(callbacks);
//! assert_eq!(vec!["a", "b"], tables);
//! ```

use std::convert::Infallible;
use std::fmt;

use tracing::trace;

use super::{Expr, ObjectName, Query, Statement, TableFactor, Value};
use crate::error::{MalformedNodeError, VisitError};

mod dispatch;
#[cfg(test)]
mod test;

pub use self::dispatch::Visit;

/// What a hook asks the walker to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Do not descend into this node's children. The node's post hook still
    /// fires. Returned from a post hook it means `Continue`.
    SkipChildren,
    /// End the walk. No further hooks fire and `visit` returns `Ok`.
    Break,
}

type HookFn<'h, T, E> = Box<dyn FnMut(&T) -> Result<Flow, E> + 'h>;

/// The pre and post callbacks registered for one node category.
pub struct Hook<'h, T, E> {
    pre: Option<HookFn<'h, T, E>>,
    post: Option<HookFn<'h, T, E>>,
}

impl<'h, T, E> Default for Hook<'h, T, E> {
    fn default() -> Self {
        Hook {
            pre: None,
            post: None,
        }
    }
}

impl<'h, T, E> Hook<'h, T, E> {
    pub fn is_empty(&self) -> bool {
        self.pre.is_none() && self.post.is_none()
    }
}

impl<'h, T, E> fmt::Debug for Hook<'h, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Hook")
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .finish()
    }
}

/// A sparse set of hooks. `E` is the error type hooks may fail with.
#[derive(Debug)]
pub struct Callbacks<'h, E = Infallible> {
    statement: Hook<'h, Statement, E>,
    query: Hook<'h, Query, E>,
    relation: Hook<'h, ObjectName, E>,
    table_factor: Hook<'h, TableFactor, E>,
    expr: Hook<'h, Expr, E>,
    value: Hook<'h, Value, E>,
}

impl<'h, E> Default for Callbacks<'h, E> {
    fn default() -> Self {
        Callbacks {
            statement: Hook::default(),
            query: Hook::default(),
            relation: Hook::default(),
            table_factor: Hook::default(),
            expr: Hook::default(),
            value: Hook::default(),
        }
    }
}

impl<'h> Callbacks<'h, Infallible> {
    /// An empty set of hooks that cannot fail. Use `Callbacks::default()`
    /// with an explicit error type for fallible hooks.
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! hook_builders {
    ($($field:ident: $node:ty => $pre:ident, $post:ident, $on:ident;)*) => {
        impl<'h, E> Callbacks<'h, E> {
            /// Whether no hook at all is registered.
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_empty())*
            }

            $(
                #[doc = concat!("Registers the hook fired before the children of every `", stringify!($node), "` it is called for.")]
                pub fn $pre<F>(mut self, f: F) -> Self
                where
                    F: FnMut(&$node) -> Result<Flow, E> + 'h,
                {
                    self.$field.pre = Some(Box::new(f));
                    self
                }

                #[doc = concat!("Registers the hook fired after the children of every `", stringify!($node), "` it is called for.")]
                pub fn $post<F>(mut self, f: F) -> Self
                where
                    F: FnMut(&$node) -> Result<Flow, E> + 'h,
                {
                    self.$field.post = Some(Box::new(f));
                    self
                }

                /// Registers an infallible pre hook that always continues.
                pub fn $on<F>(self, mut f: F) -> Self
                where
                    F: FnMut(&$node) + 'h,
                {
                    self.$pre(move |node| {
                        f(node);
                        Ok(Flow::Continue)
                    })
                }
            )*
        }

        $(
            impl Hooked for $node {
                fn hook<'a, 'h, E>(callbacks: &'a mut Callbacks<'h, E>) -> &'a mut Hook<'h, Self, E> {
                    &mut callbacks.$field
                }
            }
        )*
    };
}

hook_builders! {
    statement: Statement => pre_statement, post_statement, on_statement;
    query: Query => pre_query, post_query, on_query;
    relation: ObjectName => pre_relation, post_relation, on_relation;
    table_factor: TableFactor => pre_table_factor, post_table_factor, on_table_factor;
    expr: Expr => pre_expr, post_expr, on_expr;
    value: Value => pre_value, post_value, on_value;
}

/// Maps a hooked node type to its slot in [`Callbacks`].
pub(crate) trait Hooked: Sized {
    fn hook<'a, 'h, E>(callbacks: &'a mut Callbacks<'h, E>) -> &'a mut Hook<'h, Self, E>;
}

/// Why a walk stopped before finishing.
#[derive(Debug)]
pub enum Halt<E> {
    /// A hook returned [`Flow::Break`].
    Stop,
    Failed(VisitError<E>),
}

impl<E> Halt<E> {
    fn callback(err: E) -> Self {
        Halt::Failed(VisitError::Callback(err))
    }
}

impl<E> From<MalformedNodeError> for Halt<E> {
    fn from(err: MalformedNodeError) -> Self {
        Halt::Failed(VisitError::Malformed(err))
    }
}

/// Fires the pre hook of `node`, walks its children unless told otherwise,
/// then fires the post hook.
pub(crate) fn hooked<'h, T, E, F>(
    node: &T,
    callbacks: &mut Callbacks<'h, E>,
    children: F,
) -> Result<(), Halt<E>>
where
    T: Hooked,
    F: FnOnce(&mut Callbacks<'h, E>) -> Result<(), Halt<E>>,
{
    let flow = match &mut T::hook(callbacks).pre {
        Some(pre) => pre(node).map_err(Halt::callback)?,
        None => Flow::Continue,
    };
    match flow {
        Flow::Break => return Err(Halt::Stop),
        Flow::SkipChildren => {}
        Flow::Continue => children(callbacks)?,
    }
    if let Some(post) = &mut T::hook(callbacks).post {
        if post(node).map_err(Halt::callback)? == Flow::Break {
            return Err(Halt::Stop);
        }
    }
    Ok(())
}

/// Walks `root` depth-first, calling the registered hooks in source order.
///
/// A hook returning [`Flow::Break`] ends the walk successfully. A hook error
/// or a malformed node aborts it and is returned unchanged.
pub fn visit<N, E>(root: &N, callbacks: &mut Callbacks<'_, E>) -> Result<(), VisitError<E>>
where
    N: Visit + ?Sized,
{
    trace!(root = std::any::type_name::<N>(), "visiting tree");
    match root.walk(callbacks) {
        Ok(()) | Err(Halt::Stop) => Ok(()),
        Err(Halt::Failed(err)) => Err(err),
    }
}
