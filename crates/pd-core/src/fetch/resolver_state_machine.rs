//! Detail resolver state machine
//!
//! 这个模块实现了详情解析的显式状态机,按 locator 驱动一次次独立的请求。
//!
//! # Design Principles / 设计原则
//!
//! - **显式状态**: `Idle → Loading → Resolved | Failed`, 以及终态 `Unmounted`
//! - **代际守卫**: 每次请求分配一个 generation, 完成事件的 generation 与当前不符时直接丢弃
//! - **可测试**: 纯函数式状态转换 `(state, event) -> (new_state, actions[])`
//!
//! # Architecture / 架构
//!
//! ```text
//! ResolverStateMachine (pd-core)
//!   ├── State: 当前解析状态
//!   ├── Event: 触发状态转换的事件 (locator 变化 / 请求完成 / 卸载)
//!   └── Action: 状态转换产生的动作
//!
//! DetailResolver (pd-app)
//!   ├── 接收 locator 变化与请求完成
//!   ├── 调用状态机获取 actions
//!   └── 执行 actions (发起请求 / 取消请求 / 发布 FetchState)
//! ```

use super::fetch_state::{FetchFailure, FetchState};
use crate::ids::Locator;

/// Monotonic id of one fetch issued by a resolver.
pub type Generation = u64;

/// 解析状态机的核心状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverState<T> {
    /// 未请求任何 locator, 或 locator 为空
    Idle,

    /// 请求进行中; `stale` 保留上一次解析结果
    Loading {
        locator: Locator,
        generation: Generation,
        stale: Option<T>,
    },

    /// 解析成功
    Resolved {
        locator: Locator,
        generation: Generation,
        record: T,
    },

    /// 解析失败 (不会自动重试)
    Failed {
        locator: Locator,
        generation: Generation,
        failure: FetchFailure,
    },

    /// 所属视图已卸载 (终态)
    Unmounted,
}

impl<T> ResolverState<T> {
    /// Locator the state is currently targeting, if any.
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            ResolverState::Loading { locator, .. }
            | ResolverState::Resolved { locator, .. }
            | ResolverState::Failed { locator, .. } => Some(locator),
            ResolverState::Idle | ResolverState::Unmounted => None,
        }
    }

    /// Short description for transition logs; does not require `T: Debug`.
    pub fn label(&self) -> String {
        match self {
            ResolverState::Idle => "Idle".to_string(),
            ResolverState::Loading {
                locator, generation, ..
            } => format!("Loading({locator}, gen={generation})"),
            ResolverState::Resolved {
                locator, generation, ..
            } => format!("Resolved({locator}, gen={generation})"),
            ResolverState::Failed {
                locator,
                generation,
                failure,
            } => format!("Failed({locator}, gen={generation}, {failure})"),
            ResolverState::Unmounted => "Unmounted".to_string(),
        }
    }
}

/// 触发状态转换的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverEvent<T> {
    /// 消费方给出新的 locator (可能为空)
    LocatorChanged(Locator),

    /// 某次请求完成
    FetchCompleted {
        generation: Generation,
        outcome: Result<T, FetchFailure>,
    },

    /// 所属视图卸载
    Unmount,
}

impl<T> ResolverEvent<T> {
    fn label(&self) -> String {
        match self {
            ResolverEvent::LocatorChanged(locator) => format!("LocatorChanged({locator})"),
            ResolverEvent::FetchCompleted {
                generation,
                outcome,
            } => format!(
                "FetchCompleted(gen={generation}, ok={})",
                outcome.is_ok()
            ),
            ResolverEvent::Unmount => "Unmount".to_string(),
        }
    }
}

/// 状态转换产生的动作
///
/// 这些动作由 resolver 执行,实现状态机的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverAction<T> {
    /// 发起一次请求
    StartFetch {
        locator: Locator,
        generation: Generation,
    },

    /// 取消进行中的请求
    CancelFetch { generation: Generation },

    /// 向消费方发布新的 FetchState
    Publish(FetchState<T>),

    /// 过期的完成事件被丢弃
    DiscardCompletion { generation: Generation },

    /// 记录状态转换日志
    LogTransition {
        old_state: String,
        event: String,
        new_state: String,
    },
}

/// Explicit state machine behind one detail resolver.
///
/// ```
/// use pd_core::fetch::{ResolverAction, ResolverEvent, ResolverStateMachine};
/// use pd_core::Locator;
///
/// let mut sm = ResolverStateMachine::<u32>::new();
/// let actions = sm.handle_event(ResolverEvent::LocatorChanged(Locator::new("https://x/1")));
/// assert!(actions
///     .iter()
///     .any(|a| matches!(a, ResolverAction::StartFetch { generation: 1, .. })));
///
/// sm.handle_event(ResolverEvent::FetchCompleted { generation: 1, outcome: Ok(7) });
/// assert_eq!(sm.fetch_state().value, Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct ResolverStateMachine<T> {
    state: ResolverState<T>,
    last_generation: Generation,
}

impl<T: Clone> ResolverStateMachine<T> {
    pub fn new() -> Self {
        Self {
            state: ResolverState::Idle,
            last_generation: 0,
        }
    }

    pub fn state(&self) -> &ResolverState<T> {
        &self.state
    }

    /// Consumer-visible projection of the current state.
    pub fn fetch_state(&self) -> FetchState<T> {
        match &self.state {
            ResolverState::Loading { stale, .. } => FetchState::loading(stale.clone()),
            ResolverState::Resolved { record, .. } => FetchState::resolved(record.clone()),
            ResolverState::Idle | ResolverState::Failed { .. } | ResolverState::Unmounted => {
                FetchState::idle()
            }
        }
    }

    /// 处理事件并返回动作列表
    ///
    /// A `LogTransition` action is prepended whenever the state label changes.
    pub fn handle_event(&mut self, event: ResolverEvent<T>) -> Vec<ResolverAction<T>> {
        let old_state = self.state.label();
        let event_label = event.label();

        let actions = self.transition(event);

        let new_state = self.state.label();
        if old_state == new_state {
            return actions;
        }

        let mut all_actions = vec![ResolverAction::LogTransition {
            old_state,
            event: event_label,
            new_state,
        }];
        all_actions.extend(actions);
        all_actions
    }

    fn transition(&mut self, event: ResolverEvent<T>) -> Vec<ResolverAction<T>> {
        match event {
            ResolverEvent::LocatorChanged(locator) => self.change_locator(locator),
            ResolverEvent::FetchCompleted {
                generation,
                outcome,
            } => self.complete(generation, outcome),
            ResolverEvent::Unmount => self.unmount(),
        }
    }

    fn change_locator(&mut self, locator: Locator) -> Vec<ResolverAction<T>> {
        if matches!(self.state, ResolverState::Unmounted) {
            return Vec::new();
        }
        // Same target: no refetch, whatever the outcome was.
        if self.state.locator() == Some(&locator) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if let ResolverState::Loading { generation, .. } = &self.state {
            actions.push(ResolverAction::CancelFetch {
                generation: *generation,
            });
        }

        if locator.is_blank() {
            let was_idle = matches!(self.state, ResolverState::Idle);
            self.state = ResolverState::Idle;
            if !was_idle {
                actions.push(ResolverAction::Publish(FetchState::idle()));
            }
            return actions;
        }

        let stale = match std::mem::replace(&mut self.state, ResolverState::Idle) {
            ResolverState::Loading { stale, .. } => stale,
            ResolverState::Resolved { record, .. } => Some(record),
            _ => None,
        };

        self.last_generation += 1;
        let generation = self.last_generation;
        self.state = ResolverState::Loading {
            locator: locator.clone(),
            generation,
            stale: stale.clone(),
        };

        actions.push(ResolverAction::Publish(FetchState::loading(stale)));
        actions.push(ResolverAction::StartFetch {
            locator,
            generation,
        });
        actions
    }

    fn complete(
        &mut self,
        generation: Generation,
        outcome: Result<T, FetchFailure>,
    ) -> Vec<ResolverAction<T>> {
        let locator = match &self.state {
            ResolverState::Loading {
                locator,
                generation: current,
                ..
            } if *current == generation => locator.clone(),
            _ => return vec![ResolverAction::DiscardCompletion { generation }],
        };

        match outcome {
            Ok(record) => {
                self.state = ResolverState::Resolved {
                    locator,
                    generation,
                    record: record.clone(),
                };
                vec![ResolverAction::Publish(FetchState::resolved(record))]
            }
            Err(failure) => {
                self.state = ResolverState::Failed {
                    locator,
                    generation,
                    failure,
                };
                vec![ResolverAction::Publish(FetchState::idle())]
            }
        }
    }

    fn unmount(&mut self) -> Vec<ResolverAction<T>> {
        let mut actions = Vec::new();
        if let ResolverState::Loading { generation, .. } = &self.state {
            actions.push(ResolverAction::CancelFetch {
                generation: *generation,
            });
        }
        if matches!(
            self.state,
            ResolverState::Loading { .. } | ResolverState::Resolved { .. }
        ) {
            actions.push(ResolverAction::Publish(FetchState::idle()));
        }
        self.state = ResolverState::Unmounted;
        actions
    }
}

impl<T: Clone> Default for ResolverStateMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}
