use spirv_std::glam::{Mat3, Mat4, UVec4, Vec3, Vec4};

#[allow(unused_imports)]
use spirv_std::num_traits::Float;

/// Blends four joint matrices by their weights.
///
/// Every index must address `joint_matrices` and the weights are expected to
/// sum to one. Neither is checked here: weights that don't sum to one yield a
/// scaled or sheared transform, which is returned as-is.
pub fn skin_model<const N: usize>(
    joint_matrices: &[Mat4; N],
    indexes: UVec4,
    weights: Vec4,
) -> Mat4 {
    weights.x * joint_matrices[indexes.x as usize]
        + weights.y * joint_matrices[indexes.y as usize]
        + weights.z * joint_matrices[indexes.z as usize]
        + weights.w * joint_matrices[indexes.w as usize]
}

/// Inverse-transpose of a 3x3 matrix using the cofactor cross products.
///
/// A singular input divides by a zero determinant and returns non-finite
/// columns.
pub fn inverse_transpose_3x3(input: Mat3) -> Mat3 {
    let Mat3 {
        x_axis,
        y_axis,
        z_axis,
    } = input;
    let cofactors = Mat3::from_cols(
        y_axis.cross(z_axis),
        z_axis.cross(x_axis),
        x_axis.cross(y_axis),
    );
    cofactors * x_axis.dot(cofactors.x_axis).recip()
}

/// Transforms a normal by the skin matrix and renormalizes it.
///
/// Translation is dropped and non-uniform scale is corrected through the
/// inverse-transpose of the upper 3x3.
pub fn skin_normals(model: Mat4, normal: Vec3) -> Vec3 {
    (inverse_transpose_3x3(Mat3::from_mat4(model)) * normal).normalize()
}
