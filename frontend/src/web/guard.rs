//! 路由守卫模块
//!
//! 纯函数：输入会话与目标路由，输出渲染或重定向。
//! 每次导航都重新计算，不做缓存。

use feedapp_shared::Role;

use super::route::AppRoute;
use crate::session::Session;

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(AppRoute),
}

/// **核心守卫逻辑**
///
/// - 无令牌 -> 登录页
/// - 有令牌但角色不在允许列表中 -> user 去反馈页，其他情况去登录页
/// - 其余情况放行
pub fn guard(session: &Session, allowed_roles: Option<&[Role]>) -> GuardDecision {
    if !session.has_token() {
        return GuardDecision::Redirect(AppRoute::Login);
    }

    match allowed_roles {
        Some(roles) if !session.role.is_some_and(|role| roles.contains(&role)) => {
            GuardDecision::Redirect(role_fallback(session.role))
        }
        _ => GuardDecision::Render,
    }
}

fn role_fallback(role: Option<Role>) -> AppRoute {
    match role {
        Some(Role::User) => AppRoute::Feedback,
        _ => AppRoute::Login,
    }
}

/// 兜底路由：按登录状态跳转到对应首页
pub fn fallback_route(session: &Session) -> AppRoute {
    if session.has_token() {
        AppRoute::home_for(session.role)
    } else {
        AppRoute::Login
    }
}

/// 单步解析：守卫或兜底规则给出的下一个路由
fn step(target: Option<AppRoute>, session: &Session) -> AppRoute {
    let Some(route) = target else {
        return fallback_route(session);
    };

    if route.is_protected() {
        return match guard(session, route.allowed_roles()) {
            GuardDecision::Render => route,
            GuardDecision::Redirect(to) => to,
        };
    }

    if route.should_redirect_when_authenticated() && session.has_token() {
        let home = fallback_route(session);
        if home.is_protected() {
            return home;
        }
    }

    route
}

/// 解析一次导航的最终落点
///
/// `target` 为 `None` 表示未知路径。重定向会继续解析，
/// 例如 admin 访问反馈页先被送往登录页，再由登录页送回面板。
pub fn resolve(target: Option<AppRoute>, session: &Session) -> AppRoute {
    let mut route = step(target, session);
    // 路由总数有限，几步之内必然收敛
    for _ in 0..4 {
        let next = step(Some(route), session);
        if next == route {
            break;
        }
        route = next;
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE_SETS: [Option<&[Role]>; 5] = [
        None,
        Some(&[]),
        Some(&[Role::Admin]),
        Some(&[Role::User]),
        Some(&[Role::Admin, Role::User]),
    ];

    fn sessions_without_token() -> Vec<Session> {
        [None, Some(String::new())]
            .into_iter()
            .flat_map(|token| {
                [None, Some(Role::Admin), Some(Role::User)].map(|role| Session {
                    token: token.clone(),
                    role,
                })
            })
            .collect()
    }

    #[test]
    fn no_token_always_redirects_to_login() {
        for session in sessions_without_token() {
            for roles in ROLE_SETS {
                assert_eq!(
                    guard(&session, roles),
                    GuardDecision::Redirect(AppRoute::Login),
                    "{:?} / {:?}",
                    session,
                    roles
                );
            }
        }
    }

    #[test]
    fn user_on_admin_route_goes_to_feedback() {
        let session = Session::new("t", Role::User);
        assert_eq!(
            guard(&session, Some(&[Role::Admin])),
            GuardDecision::Redirect(AppRoute::Feedback)
        );
    }

    #[test]
    fn admin_or_missing_role_on_mismatch_goes_to_login() {
        let admin = Session::new("t", Role::Admin);
        assert_eq!(
            guard(&admin, Some(&[Role::User])),
            GuardDecision::Redirect(AppRoute::Login)
        );

        let no_role = Session {
            token: Some("t".into()),
            role: None,
        };
        assert_eq!(
            guard(&no_role, Some(&[Role::Admin])),
            GuardDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn allowed_role_renders() {
        for role in [Role::Admin, Role::User] {
            let session = Session::new("t", role);
            for roles in ROLE_SETS.into_iter().flatten().filter(|r| r.contains(&role)) {
                assert_eq!(guard(&session, Some(roles)), GuardDecision::Render);
            }
            assert_eq!(guard(&session, None), GuardDecision::Render);
        }
    }

    #[test]
    fn unknown_paths_follow_auth_state() {
        assert_eq!(resolve(None, &Session::default()), AppRoute::Login);
        assert_eq!(resolve(None, &Session::new("t", Role::Admin)), AppRoute::Dashboard);
        assert_eq!(resolve(None, &Session::new("t", Role::User)), AppRoute::Feedback);
    }

    #[test]
    fn protected_routes_are_guarded() {
        let user = Session::new("t", Role::User);
        assert_eq!(resolve(Some(AppRoute::Dashboard), &user), AppRoute::Feedback);
        assert_eq!(resolve(Some(AppRoute::Feedback), &user), AppRoute::Feedback);

        let admin = Session::new("t", Role::Admin);
        assert_eq!(resolve(Some(AppRoute::Dashboard), &admin), AppRoute::Dashboard);
        assert_eq!(resolve(Some(AppRoute::Feedback), &admin), AppRoute::Dashboard);

        assert_eq!(resolve(Some(AppRoute::Dashboard), &Session::default()), AppRoute::Login);
    }

    #[test]
    fn public_routes_send_signed_in_users_home() {
        let anon = Session::default();
        assert_eq!(resolve(Some(AppRoute::Login), &anon), AppRoute::Login);
        assert_eq!(resolve(Some(AppRoute::Signup), &anon), AppRoute::Signup);

        let admin = Session::new("t", Role::Admin);
        assert_eq!(resolve(Some(AppRoute::Login), &admin), AppRoute::Dashboard);
        assert_eq!(resolve(Some(AppRoute::Signup), &admin), AppRoute::Dashboard);

        let no_role = Session {
            token: Some("t".into()),
            role: None,
        };
        assert_eq!(resolve(Some(AppRoute::Login), &no_role), AppRoute::Login);
    }

    #[test]
    fn resolution_is_a_fixed_point() {
        let sessions = [
            Session::default(),
            Session::new("t", Role::Admin),
            Session::new("t", Role::User),
            Session {
                token: Some("t".into()),
                role: None,
            },
        ];
        let targets = [
            None,
            Some(AppRoute::Login),
            Some(AppRoute::Signup),
            Some(AppRoute::Feedback),
            Some(AppRoute::Dashboard),
        ];
        for session in &sessions {
            for target in targets {
                let landed = resolve(target, session);
                assert_eq!(resolve(Some(landed), session), landed);
            }
        }
    }
}
